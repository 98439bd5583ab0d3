use std::collections::BTreeMap;

use tracing::debug;

use crate::builders::{BuildContext, BuilderConfig, ResourceSpec};
use crate::config::DeploymentConfig;
use crate::error::Result;
use crate::model::ArmTemplate;
use crate::resolve::{ensure_named, resolve};

/// Everything declared for one deployment, before resolution.
#[derive(Debug, Clone, Default)]
pub struct Deployment {
    pub context: BuildContext,
    pub builders: Vec<BuilderConfig>,
    pub outputs: BTreeMap<String, String>,
}

impl Deployment {
    pub fn from_config(config: &DeploymentConfig) -> Self {
        Self {
            context: BuildContext {
                location: config.deployment.location.clone(),
            },
            builders: config.resources.clone(),
            outputs: config
                .outputs
                .iter()
                .map(|(name, output)| (name.clone(), output.expression()))
                .collect(),
        }
    }

    /// Finalize every builder in declaration order.
    pub fn specs(&self) -> Result<Vec<ResourceSpec>> {
        let mut specs = Vec::new();
        for builder in &self.builders {
            let produced = builder.finalize(&self.context)?;
            debug!(
                builder = builder.display_name(),
                specs = produced.len(),
                "finalized builder"
            );
            specs.extend(produced);
        }
        Ok(specs)
    }

    /// Resolve the declared builders into a template.
    pub fn build(&self) -> Result<ArmTemplate> {
        let resources = resolve(self.specs()?)?;
        ensure_named(&resources)?;
        Ok(ArmTemplate {
            resources,
            outputs: self.outputs.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::error::ArmforgeError;
    use crate::model::ResourceKind;

    #[test]
    fn web_app_and_storage_resolve_in_order() {
        let config = parse_config(
            r#"
[[resources]]
kind = "storage_account"
name = "store"

[[resources]]
kind = "web_app"
name = "site"
"#,
        )
        .unwrap();
        let template = Deployment::from_config(&config).build().unwrap();
        let kinds: Vec<ResourceKind> = template.resources.iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::StorageAccount,
                ResourceKind::ServerFarm,
                ResourceKind::AppInsights,
                ResourceKind::WebApp,
            ]
        );
    }

    #[test]
    fn web_apps_share_a_linked_plan() {
        let config = parse_config(
            r#"
[[resources]]
kind = "web_app"
name = "first"
service_plan_name = "shared"
app_insights = false

[[resources]]
kind = "web_app"
name = "second"
link_to_service_plan = "shared"
app_insights = false
"#,
        )
        .unwrap();
        let template = Deployment::from_config(&config).build().unwrap();
        let farms = template
            .resources
            .iter()
            .filter(|r| r.kind() == ResourceKind::ServerFarm)
            .count();
        assert_eq!(farms, 1);
        assert_eq!(template.resources.len(), 3);
    }

    #[test]
    fn link_declared_later_is_dangling() {
        let config = parse_config(
            r#"
[[resources]]
kind = "container"
name = "web"
image = "nginx"
link_to_container_group = "g"

[[resources]]
kind = "container_group"
name = "g"
"#,
        )
        .unwrap();
        let err = Deployment::from_config(&config).build().unwrap_err();
        assert!(matches!(err, ArmforgeError::DanglingExternalReference { .. }));
    }
}
