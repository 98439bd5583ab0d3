use serde::Deserialize;

use super::{
    require_non_empty, require_one_of, BuildContext, Contribution, GroupSettings, ResourceSpec,
};
use crate::error::{ArmforgeError, Result};
use crate::model::{
    ContainerGroup, ContainerInstance, IpAddress, IpAddressKind, OsType, Resource, ResourceKind,
    ResourceName, ResourceRef, RestartPolicy,
};

fn default_cpu() -> u32 {
    1
}

fn default_memory() -> f64 {
    1.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerGroupConfig {
    pub name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub os_type: OsType,
    #[serde(default)]
    pub restart_policy: RestartPolicy,
    #[serde(default)]
    pub ip_address: IpAddressKind,
}

impl ContainerGroupConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name", &self.name)
    }

    /// Declares an empty group; containers are merged in by linking to it.
    pub fn finalize(&self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        let group = ContainerGroup {
            name: ResourceName::new(&self.name),
            location: ctx.location_or(self.location.as_deref()),
            os_type: self.os_type,
            restart_policy: self.restart_policy,
            ip_address: IpAddress {
                kind: self.ip_address,
                ports: Vec::new(),
            },
            containers: Vec::new(),
        };
        Ok(vec![ResourceSpec::create(Resource::ContainerGroup(group))])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerConfig {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub ports: Vec<u16>,
    #[serde(default = "default_cpu")]
    pub cpu: u32,
    /// Memory limit in GB.
    #[serde(default = "default_memory")]
    pub memory: f64,

    /// Create a new group with this name for the container.
    pub group_name: Option<String>,
    /// Add the container to a group declared elsewhere in the deployment.
    pub link_to_container_group: Option<String>,

    // Only used when this container's group is created on its behalf.
    pub location: Option<String>,
    #[serde(default)]
    pub os_type: OsType,
    #[serde(default)]
    pub restart_policy: RestartPolicy,
    #[serde(default)]
    pub ip_address: IpAddressKind,
}

impl ContainerConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name", &self.name)?;
        require_non_empty(&self.name, "image", &self.image)?;
        if self.cpu == 0 {
            return Err(ArmforgeError::ConfigInvalid {
                name: self.name.clone(),
                reason: "'cpu' must be at least 1".into(),
            });
        }
        if !self.memory.is_finite() || self.memory <= 0.0 {
            return Err(ArmforgeError::ConfigInvalid {
                name: self.name.clone(),
                reason: "'memory' must be a positive number".into(),
            });
        }
        require_one_of(
            &self.name,
            ("group_name", self.group_name.as_ref()),
            ("link_to_container_group", self.link_to_container_group.as_ref()),
        )
    }

    /// The group this container belongs to, defaulting to `<name>-group`.
    pub fn group_ref(&self) -> ResourceRef {
        ResourceRef::from_settings(
            self.group_name.as_deref(),
            self.link_to_container_group.as_deref(),
        )
        .or_infer(|| ResourceName::new(&self.name).with_suffix("-group"))
    }

    pub fn finalize(&self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        Ok(vec![self.to_spec(ctx, self.group_ref())])
    }

    /// Build the container's spec against an explicit group reference,
    /// skipping name inference.
    pub fn to_spec(&self, ctx: &BuildContext, group: ResourceRef) -> ResourceSpec {
        let instance = ContainerInstance {
            name: ResourceName::new(&self.name),
            image: self.image.clone(),
            ports: self.ports.clone(),
            cpu: self.cpu,
            memory_gb: self.memory,
        };
        ResourceSpec {
            reference: group,
            kind: ResourceKind::ContainerGroup,
            contribution: Contribution::Container {
                instance,
                group: GroupSettings {
                    location: ctx.location_or(self.location.as_deref()),
                    os_type: self.os_type,
                    restart_policy: self.restart_policy,
                    ip_address: self.ip_address,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_name_defaults_to_container_name() {
        let cfg: ContainerConfig = toml::from_str(
            r#"
name = "nginx"
image = "nginx:1.17.6"
"#,
        )
        .unwrap();
        assert_eq!(
            cfg.group_ref(),
            ResourceRef::AutomaticallyCreated("nginx-group".into())
        );
    }

    #[test]
    fn linking_yields_external_reference() {
        let cfg: ContainerConfig = toml::from_str(
            r#"
name = "nginx"
image = "nginx:1.17.6"
link_to_container_group = "g"
"#,
        )
        .unwrap();
        assert_eq!(cfg.group_ref(), ResourceRef::External("g".into()));
    }

    #[test]
    fn both_group_settings_rejected() {
        let cfg: ContainerConfig = toml::from_str(
            r#"
name = "nginx"
image = "nginx"
group_name = "a"
link_to_container_group = "b"
"#,
        )
        .unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_image_rejected() {
        let cfg: ContainerConfig = toml::from_str("name = \"x\"\nimage = \" \"").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_finite_memory_rejected() {
        for memory in ["nan", "inf", "-inf", "0.0"] {
            let cfg: ContainerConfig =
                toml::from_str(&format!("name = \"x\"\nimage = \"x\"\nmemory = {memory}"))
                    .unwrap();
            assert!(
                matches!(cfg.validate(), Err(ArmforgeError::ConfigInvalid { .. })),
                "memory = {memory} should be rejected"
            );
        }
    }

    #[test]
    fn fractional_memory_accepted() {
        let cfg: ContainerConfig =
            toml::from_str("name = \"x\"\nimage = \"x\"\nmemory = 0.5").unwrap();
        assert!(cfg.validate().is_ok());
    }
}
