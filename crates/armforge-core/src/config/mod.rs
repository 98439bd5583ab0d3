pub mod schema;

use std::path::{Path, PathBuf};

use crate::error::{ArmforgeError, Result};

pub use schema::{DeploymentConfig, DeploymentSettings, OutputConfig};

pub const CONFIG_FILE: &str = "armforge.toml";

/// Accept either the description file itself or a directory holding one.
pub fn config_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Load and validate a deployment description.
pub fn load_config(path: &Path) -> Result<DeploymentConfig> {
    let config_path = config_path(path);

    if !config_path.exists() {
        return Err(ArmforgeError::ConfigNotFound { path: config_path });
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| ArmforgeError::Io {
        context: format!("reading {}", config_path.display()),
        source: e,
    })?;

    let config = parse_config(&content)?;
    tracing::debug!(
        path = %config_path.display(),
        resources = config.resources.len(),
        "loaded deployment description"
    );
    Ok(config)
}

/// Parse and validate a deployment description from TOML text.
pub fn parse_config(content: &str) -> Result<DeploymentConfig> {
    let config: DeploymentConfig =
        toml::from_str(content).map_err(|e| ArmforgeError::ConfigParse { source: e })?;
    config.validate()?;
    Ok(config)
}
