use std::collections::BTreeMap;

use serde::Deserialize;

use crate::builders::BuilderConfig;
use crate::error::{ArmforgeError, Result};
use crate::expressions;
use crate::model::{Location, ResourceName};

/// Root structure deserialized from armforge.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    #[serde(default)]
    pub deployment: DeploymentSettings,

    /// Builders in declaration order; resolution follows this order.
    #[serde(default)]
    pub resources: Vec<BuilderConfig>,

    #[serde(default)]
    pub outputs: BTreeMap<String, OutputConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentSettings {
    /// Location used by every resource that does not set its own.
    #[serde(default)]
    pub location: Location,

    /// Template path, relative to the description file.
    pub output: Option<String>,
}

/// A template output: a raw expression or a key read from a resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OutputConfig {
    Expression(String),
    StorageKey { storage_key: String },
    CosmosKey { cosmos_key: String },
    InstrumentationKey { instrumentation_key: String },
}

impl OutputConfig {
    pub fn expression(&self) -> String {
        match self {
            Self::Expression(expr) => expr.clone(),
            Self::StorageKey { storage_key } => {
                expressions::storage_connection_string(&ResourceName::new(storage_key))
            }
            Self::CosmosKey { cosmos_key } => {
                expressions::cosmos_primary_key(&ResourceName::new(cosmos_key))
            }
            Self::InstrumentationKey {
                instrumentation_key,
            } => expressions::instrumentation_key(&ResourceName::new(instrumentation_key)),
        }
    }
}

impl DeploymentConfig {
    /// Validate the description for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.deployment.location.as_str().trim().is_empty() {
            return Err(ArmforgeError::ConfigInvalid {
                name: "deployment".into(),
                reason: "'location' must not be empty".into(),
            });
        }

        for resource in &self.resources {
            resource.validate()?;
        }

        for (name, output) in &self.outputs {
            if output.expression().trim().is_empty() {
                return Err(ArmforgeError::ConfigInvalid {
                    name: name.clone(),
                    reason: "output value must not be empty".into(),
                });
            }
        }

        Ok(())
    }
}
