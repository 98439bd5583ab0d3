//! Renders an [`ArmTemplate`] into deployment template JSON.

mod resources;

use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::info;

use crate::error::{ArmforgeError, Result};
use crate::model::ArmTemplate;

pub use resources::render_resource;

pub const SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#";
pub const CONTENT_VERSION: &str = "1.0.0.0";

/// Build the template document. Resources keep their input order.
pub fn to_document(template: &ArmTemplate) -> Value {
    let resources: Vec<Value> = template.resources.iter().map(render_resource).collect();

    let parameters: Map<String, Value> = template
        .parameters()
        .into_iter()
        .map(|p| (p.name().to_string(), json!({ "type": "securestring" })))
        .collect();

    let outputs: Map<String, Value> = template
        .outputs
        .iter()
        .map(|(name, value)| (name.clone(), json!({ "type": "string", "value": value })))
        .collect();

    json!({
        "$schema": SCHEMA,
        "contentVersion": CONTENT_VERSION,
        "resources": resources,
        "parameters": parameters,
        "outputs": outputs,
    })
}

/// Serialize the template document as pretty-printed JSON text.
pub fn to_json(template: &ArmTemplate) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&to_document(template))
        .map_err(|e| ArmforgeError::Serialize { source: e })?;
    text.push('\n');
    Ok(text)
}

/// Write rendered template text to `path`, replacing any existing file.
pub fn write_template(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ArmforgeError::Io {
            context: format!("creating directory {}", parent.display()),
            source: e,
        })?;
    }
    std::fs::write(path, contents).map_err(|e| ArmforgeError::Io {
        context: format!("writing template {}", path.display()),
        source: e,
    })?;
    info!(path = %path.display(), bytes = contents.len(), "template written");
    Ok(())
}
