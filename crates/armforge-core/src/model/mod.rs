pub mod container;
pub mod cosmos;
pub mod sql;
pub mod storage;
pub mod web;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use container::{
    ContainerGroup, ContainerInstance, IpAddress, IpAddressKind, OsType, PortBinding, Protocol,
    RestartPolicy,
};
pub use cosmos::{
    ConsistencyPolicy, CosmosAccount, CosmosContainer, CosmosDatabase, DataType, FailoverPolicy,
    IncludedPath, Index, IndexKind, PartitionKey,
};
pub use sql::{SqlDatabase, SqlServer, SqlSku};
pub use storage::{BlobAccess, BlobContainer, StorageAccount, StorageSku};
pub use web::{AppInsights, ServerFarm, WebApp, WebAppSku};

/// Identifier of a resource within one template.
///
/// The empty name is a sentinel for "not yet named" and is rejected before a
/// template is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    pub const EMPTY: ResourceName = ResourceName(String::new());

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive a sibling name, e.g. `mysite` -> `mysite-farm`.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{suffix}", self.0))
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// How a builder refers to a resource it depends on or contributes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// The builder creates a new resource with this name.
    AutomaticallyCreated(ResourceName),
    /// The resource is declared by another builder in the same deployment.
    External(ResourceName),
    /// No name has been assigned yet.
    AutomaticPlaceholder,
}

impl ResourceRef {
    /// Build a reference from the pair of "create under this name" and
    /// "link to this existing resource" settings a builder exposes.
    /// Neither set yields a placeholder; `link` wins if both are present.
    pub fn from_settings(create: Option<&str>, link: Option<&str>) -> Self {
        match (create, link) {
            (_, Some(link)) => Self::External(ResourceName::new(link)),
            (Some(create), None) => Self::AutomaticallyCreated(ResourceName::new(create)),
            (None, None) => Self::AutomaticPlaceholder,
        }
    }

    pub fn name(&self) -> Option<&ResourceName> {
        match self {
            Self::AutomaticallyCreated(name) | Self::External(name) => Some(name),
            Self::AutomaticPlaceholder => None,
        }
    }

    /// Replace a placeholder with an automatically created resource whose
    /// name is derived by `infer`. Other states are returned unchanged.
    pub fn or_infer(self, infer: impl FnOnce() -> ResourceName) -> Self {
        match self {
            Self::AutomaticPlaceholder => Self::AutomaticallyCreated(infer()),
            other => other,
        }
    }
}

/// The kind of a resource, independent of its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    StorageAccount,
    AppInsights,
    ServerFarm,
    WebApp,
    ContainerGroup,
    CosmosAccount,
    CosmosDatabase,
    CosmosContainer,
    SqlServer,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StorageAccount => "storage account",
            Self::AppInsights => "app insights component",
            Self::ServerFarm => "server farm",
            Self::WebApp => "web app",
            Self::ContainerGroup => "container group",
            Self::CosmosAccount => "Cosmos DB account",
            Self::CosmosDatabase => "Cosmos DB database",
            Self::CosmosContainer => "Cosmos DB container",
            Self::SqlServer => "SQL server",
        };
        f.write_str(label)
    }
}

/// Azure region a resource is deployed to, e.g. `westeurope`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("westeurope")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value supplied at deploy time, never inlined into the template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SecureParameter(String);

impl SecureParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The template expression that reads this parameter.
    pub fn as_arm_expression(&self) -> String {
        format!("[parameters('{}')]", self.0)
    }
}

/// One fully resolved resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    StorageAccount(StorageAccount),
    AppInsights(AppInsights),
    ServerFarm(ServerFarm),
    WebApp(WebApp),
    ContainerGroup(ContainerGroup),
    CosmosAccount(CosmosAccount),
    CosmosDatabase(CosmosDatabase),
    CosmosContainer(CosmosContainer),
    SqlServer(SqlServer),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::StorageAccount(_) => ResourceKind::StorageAccount,
            Self::AppInsights(_) => ResourceKind::AppInsights,
            Self::ServerFarm(_) => ResourceKind::ServerFarm,
            Self::WebApp(_) => ResourceKind::WebApp,
            Self::ContainerGroup(_) => ResourceKind::ContainerGroup,
            Self::CosmosAccount(_) => ResourceKind::CosmosAccount,
            Self::CosmosDatabase(_) => ResourceKind::CosmosDatabase,
            Self::CosmosContainer(_) => ResourceKind::CosmosContainer,
            Self::SqlServer(_) => ResourceKind::SqlServer,
        }
    }

    pub fn name(&self) -> &ResourceName {
        match self {
            Self::StorageAccount(r) => &r.name,
            Self::AppInsights(r) => &r.name,
            Self::ServerFarm(r) => &r.name,
            Self::WebApp(r) => &r.name,
            Self::ContainerGroup(r) => &r.name,
            Self::CosmosAccount(r) => &r.name,
            Self::CosmosDatabase(r) => &r.name,
            Self::CosmosContainer(r) => &r.name,
            Self::SqlServer(r) => &r.name,
        }
    }

    /// Parameters that must be supplied when this resource is deployed.
    pub fn secure_parameters(&self) -> Vec<&SecureParameter> {
        match self {
            Self::SqlServer(server) => vec![&server.admin_password],
            _ => Vec::new(),
        }
    }
}

/// The resolved resource graph plus named outputs, ready to be written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArmTemplate {
    pub resources: Vec<Resource>,
    pub outputs: BTreeMap<String, String>,
}

impl ArmTemplate {
    /// Every secure parameter referenced in the graph, deduplicated by name.
    pub fn parameters(&self) -> Vec<&SecureParameter> {
        let mut params: Vec<&SecureParameter> = self
            .resources
            .iter()
            .flat_map(Resource::secure_parameters)
            .collect();
        params.sort();
        params.dedup();
        params
    }
}
