use std::collections::BTreeSet;
use std::path::Path;

use crate::builders::BuilderConfig;
use crate::config::{load_config, DeploymentConfig, OutputConfig};
use crate::deployment::Deployment;
use crate::error::Result;
use crate::model::{Resource, ResourceKind};

/// Result of validating a deployment description.
pub struct CheckResult {
    pub builder_count: usize,
    pub resource_count: usize,
    pub parameters: Vec<String>,
    pub outputs: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Validate a deployment description without writing anything.
pub fn check_deployment(path: &Path) -> Result<CheckResult> {
    let config = load_config(path)?;
    Ok(check_config(&config))
}

pub fn check_config(config: &DeploymentConfig) -> CheckResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    for builder in &config.resources {
        if let BuilderConfig::WebApp(app) = builder {
            if app.sku.is_dynamic() && app.always_on {
                warnings.push(format!(
                    "Web app '{}' sets always_on on a dynamic (Y1) plan, which ignores it",
                    app.name
                ));
            }
        }
    }

    let deployment = Deployment::from_config(config);
    let (resource_count, parameters) = match deployment.build() {
        Ok(template) => {
            warnings.extend(duplicate_names(&template.resources));
            warnings.extend(unknown_output_targets(config, &template.resources));
            let parameters = template
                .parameters()
                .into_iter()
                .map(|p| p.name().to_string())
                .collect();
            (template.resources.len(), parameters)
        }
        Err(e) => {
            errors.push(format!("Resolution failed: {e}"));
            (0, Vec::new())
        }
    };

    CheckResult {
        builder_count: config.resources.len(),
        resource_count,
        parameters,
        outputs: config.outputs.keys().cloned().collect(),
        warnings,
        errors,
    }
}

fn duplicate_names(resources: &[Resource]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut warnings = Vec::new();
    for resource in resources {
        let key = (resource.kind(), resource.name().clone());
        if !seen.insert(key.clone()) && reported.insert(key) {
            warnings.push(format!(
                "{} '{}' is declared more than once",
                resource.kind(),
                resource.name()
            ));
        }
    }
    warnings
}

fn unknown_output_targets(config: &DeploymentConfig, resources: &[Resource]) -> Vec<String> {
    let declared = |kind: ResourceKind, name: &str| {
        resources
            .iter()
            .any(|r| r.kind() == kind && r.name().as_str() == name)
    };

    config
        .outputs
        .iter()
        .filter_map(|(output, value)| {
            let (kind, target) = match value {
                OutputConfig::Expression(_) => return None,
                OutputConfig::StorageKey { storage_key } => {
                    (ResourceKind::StorageAccount, storage_key)
                }
                OutputConfig::CosmosKey { cosmos_key } => (ResourceKind::CosmosAccount, cosmos_key),
                OutputConfig::InstrumentationKey {
                    instrumentation_key,
                } => (ResourceKind::AppInsights, instrumentation_key),
            };
            (!declared(kind, target)).then(|| {
                format!("Output '{output}' reads from {kind} '{target}', which is not declared")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn reports_dynamic_always_on_and_missing_output_target() {
        let config = parse_config(
            r#"
[[resources]]
kind = "web_app"
name = "fn"
sku = "Y1"
always_on = true

[outputs]
key = { storage_key = "nowhere" }
"#,
        )
        .unwrap();
        let result = check_config(&config);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.resource_count, 3);
    }

    #[test]
    fn resolution_failure_is_an_error() {
        let config = parse_config(
            r#"
[[resources]]
kind = "container"
name = "web"
image = "nginx"
link_to_container_group = "missing"
"#,
        )
        .unwrap();
        let result = check_config(&config);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("missing"));
    }

    #[test]
    fn duplicate_automatic_names_warn_once() {
        let config = parse_config(
            r#"
[[resources]]
kind = "storage_account"
name = "store"

[[resources]]
kind = "storage_account"
name = "store"

[[resources]]
kind = "storage_account"
name = "store"
"#,
        )
        .unwrap();
        let result = check_config(&config);
        assert_eq!(result.warnings.len(), 1);
    }
}
