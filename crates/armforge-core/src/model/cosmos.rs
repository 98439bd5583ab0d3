use serde::Deserialize;

use super::{Location, ResourceName};

/// Read consistency guarantee of a Cosmos DB account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ConsistencyPolicy {
    #[default]
    Eventual,
    ConsistentPrefix,
    Session,
    BoundedStaleness {
        max_staleness_prefix: u32,
        max_interval_seconds: u32,
    },
}

impl ConsistencyPolicy {
    pub fn level(self) -> &'static str {
        match self {
            Self::Eventual => "Eventual",
            Self::ConsistentPrefix => "ConsistentPrefix",
            Self::Session => "Session",
            Self::BoundedStaleness { .. } => "BoundedStaleness",
        }
    }
}

/// Write replication strategy. The secondary location, when present, gets
/// failover priority 1; the account's own location is always 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum FailoverPolicy {
    #[default]
    NoFailover,
    AutoFailover(Location),
    MultiMaster(Location),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum IndexKind {
    #[default]
    Hash,
    Range,
}

impl IndexKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "Hash",
            Self::Range => "Range",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DataType {
    String,
    Number,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Index {
    pub data_type: DataType,
    pub kind: IndexKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IncludedPath {
    pub path: String,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartitionKey {
    pub paths: Vec<String>,
    #[serde(default)]
    pub kind: IndexKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CosmosAccount {
    pub name: ResourceName,
    pub location: Location,
    pub consistency: ConsistencyPolicy,
    pub failover: FailoverPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CosmosDatabase {
    pub name: ResourceName,
    pub account: ResourceName,
    pub throughput: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CosmosContainer {
    pub name: ResourceName,
    pub account: ResourceName,
    pub database: ResourceName,
    pub partition_key: PartitionKey,
    pub included_paths: Vec<IncludedPath>,
    pub excluded_paths: Vec<String>,
}
