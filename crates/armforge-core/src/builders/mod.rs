pub mod container;
pub mod cosmos;
pub mod sql;
pub mod storage;
pub mod web_app;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{
    ContainerGroup, ContainerInstance, IpAddress, IpAddressKind, Location, OsType, Resource,
    ResourceKind, ResourceRef, RestartPolicy,
};

pub use container::{ContainerConfig, ContainerGroupConfig};
pub use cosmos::{CosmosContainerConfig, CosmosDbConfig};
pub use sql::{SqlDatabaseConfig, SqlServerConfig};
pub use storage::StorageAccountConfig;
pub use web_app::WebAppConfig;

/// Deployment-wide settings every builder can fall back on.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub location: Location,
}

impl BuildContext {
    pub fn location_or(&self, location: Option<&str>) -> Location {
        location
            .map(Location::new)
            .unwrap_or_else(|| self.location.clone())
    }
}

/// Settings applied when a container's group has to be created on its behalf.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSettings {
    pub location: Location,
    pub os_type: OsType,
    pub restart_policy: RestartPolicy,
    pub ip_address: IpAddressKind,
}

/// What a builder hands to the resolver for one referenced resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Contribution {
    /// A complete resource to create.
    Definition(Resource),
    /// One container to place in a container group.
    Container {
        instance: ContainerInstance,
        group: GroupSettings,
    },
    /// Only asserts that the referenced resource is declared elsewhere.
    Link,
}

/// A builder's output, tagged with how it relates to the accumulated graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSpec {
    pub reference: ResourceRef,
    pub kind: ResourceKind,
    pub contribution: Contribution,
}

impl ResourceSpec {
    /// A spec that creates `resource` under its own name.
    pub fn create(resource: Resource) -> Self {
        Self {
            reference: ResourceRef::AutomaticallyCreated(resource.name().clone()),
            kind: resource.kind(),
            contribution: Contribution::Definition(resource),
        }
    }

    /// A spec that creates `resource` when `reference` is automatic, or only
    /// checks that it exists when `reference` is external.
    pub fn create_or_link(reference: ResourceRef, resource: Resource) -> Self {
        let kind = resource.kind();
        let contribution = match reference {
            ResourceRef::External(_) => Contribution::Link,
            _ => Contribution::Definition(resource),
        };
        Self {
            reference,
            kind,
            contribution,
        }
    }

    /// Turn the contribution into a fresh resource. `None` for link-only specs.
    pub fn materialize(self) -> Option<Resource> {
        match self.contribution {
            Contribution::Definition(resource) => Some(resource),
            Contribution::Container { instance, group } => {
                let name = self.reference.name()?.clone();
                let mut created = ContainerGroup {
                    name,
                    location: group.location,
                    os_type: group.os_type,
                    restart_policy: group.restart_policy,
                    ip_address: IpAddress {
                        kind: group.ip_address,
                        ports: Vec::new(),
                    },
                    containers: Vec::new(),
                };
                created.add_container(instance);
                Some(Resource::ContainerGroup(created))
            }
            Contribution::Link => None,
        }
    }
}

/// One `[[resources]]` entry of a deployment description.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuilderConfig {
    StorageAccount(StorageAccountConfig),
    WebApp(WebAppConfig),
    ContainerGroup(ContainerGroupConfig),
    Container(ContainerConfig),
    CosmosDb(CosmosDbConfig),
    SqlServer(SqlServerConfig),
}

impl BuilderConfig {
    /// The name this builder was declared under, for error messages.
    pub fn display_name(&self) -> &str {
        match self {
            Self::StorageAccount(c) => &c.name,
            Self::WebApp(c) => &c.name,
            Self::ContainerGroup(c) => &c.name,
            Self::Container(c) => &c.name,
            Self::CosmosDb(c) => &c.name,
            Self::SqlServer(c) => &c.name,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::StorageAccount(c) => c.validate(),
            Self::WebApp(c) => c.validate(),
            Self::ContainerGroup(c) => c.validate(),
            Self::Container(c) => c.validate(),
            Self::CosmosDb(c) => c.validate(),
            Self::SqlServer(c) => c.validate(),
        }
    }

    pub fn finalize(&self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        match self {
            Self::StorageAccount(c) => c.finalize(ctx),
            Self::WebApp(c) => c.finalize(ctx),
            Self::ContainerGroup(c) => c.finalize(ctx),
            Self::Container(c) => c.finalize(ctx),
            Self::CosmosDb(c) => c.finalize(ctx),
            Self::SqlServer(c) => c.finalize(ctx),
        }
    }
}

/// Reject a blank setting on the builder declared as `owner`.
/// Reject a builder that both names a new resource and links to an existing one.
pub(crate) fn require_one_of(
    owner: &str,
    (create_field, create): (&str, Option<&String>),
    (link_field, link): (&str, Option<&String>),
) -> Result<()> {
    if create.is_some() && link.is_some() {
        return Err(crate::error::ArmforgeError::ConfigInvalid {
            name: owner.to_string(),
            reason: format!("set either '{create_field}' or '{link_field}', not both"),
        });
    }
    Ok(())
}

pub(crate) fn require_non_empty(owner: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(crate::error::ArmforgeError::ConfigInvalid {
            name: owner.to_string(),
            reason: format!("'{field}' must not be empty"),
        });
    }
    Ok(())
}
