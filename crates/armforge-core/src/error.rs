#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::model::ResourceKind;

#[derive(Debug, Error, Diagnostic)]
pub enum ArmforgeError {
    #[error("Deployment description not found at {path}")]
    #[diagnostic(help("Ensure the directory contains an armforge.toml file"))]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse armforge.toml")]
    #[diagnostic(help("Check the TOML syntax and the 'kind' of every [[resources]] entry"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration for '{name}': {reason}")]
    ConfigInvalid { name: String, reason: String },

    #[error("Unresolved {kind} reference: no name was ever assigned")]
    #[diagnostic(help("Set an explicit name or link for the {kind} before building"))]
    UnresolvedReference { kind: ResourceKind },

    #[error("{kind} '{name}' is referenced but never declared")]
    #[diagnostic(help("Declare the {kind} before any resource that links to it"))]
    DanglingExternalReference { name: String, kind: ResourceKind },

    #[error("'{name}' is linked as a {expected} but was declared as a {found}")]
    #[diagnostic(help("Two resources of different kinds cannot share the name '{name}'"))]
    ReferenceKindMismatch {
        name: String,
        expected: ResourceKind,
        found: ResourceKind,
    },

    #[error("{kind} '{name}' must be created but carries no definition")]
    MissingDefinition { name: String, kind: ResourceKind },

    #[error("A {kind} reached the template without a name")]
    EmptyResourceName { kind: ResourceKind },

    #[error("Failed to serialize template")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Output file already exists: {path}")]
    #[diagnostic(help("Use --overwrite to replace the existing template"))]
    OutputExists { path: PathBuf },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ArmforgeError>;
