use serde::Deserialize;

use super::{require_non_empty, require_one_of, BuildContext, ResourceSpec};
use crate::error::{ArmforgeError, Result};
use crate::model::{
    ConsistencyPolicy, CosmosAccount, CosmosContainer, CosmosDatabase, FailoverPolicy,
    IncludedPath, PartitionKey, Resource, ResourceName, ResourceRef,
};

fn default_throughput() -> u32 {
    400
}

#[derive(Debug, Clone, Deserialize)]
pub struct CosmosContainerConfig {
    pub name: String,
    pub partition_key: PartitionKey,
    #[serde(default)]
    pub indexes: Vec<IncludedPath>,
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

/// A SQL-API database, its containers, and optionally the account hosting it.
#[derive(Debug, Clone, Deserialize)]
pub struct CosmosDbConfig {
    /// Database name.
    pub name: String,
    pub location: Option<String>,

    pub account_name: Option<String>,
    pub link_to_account: Option<String>,

    #[serde(default)]
    pub consistency: ConsistencyPolicy,
    #[serde(default)]
    pub failover: FailoverPolicy,
    /// Provisioned request units per second for the database.
    #[serde(default = "default_throughput")]
    pub throughput: u32,
    #[serde(default)]
    pub containers: Vec<CosmosContainerConfig>,
}

impl CosmosDbConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name", &self.name)?;
        require_one_of(
            &self.name,
            ("account_name", self.account_name.as_ref()),
            ("link_to_account", self.link_to_account.as_ref()),
        )?;
        // A linked account keeps the settings it was declared with.
        if self.link_to_account.is_some()
            && (self.consistency != ConsistencyPolicy::default()
                || self.failover != FailoverPolicy::default())
        {
            return Err(ArmforgeError::ConfigInvalid {
                name: self.name.clone(),
                reason: "'consistency' and 'failover' cannot be set with 'link_to_account'".into(),
            });
        }
        for container in &self.containers {
            require_non_empty(&self.name, "containers.name", &container.name)?;
            if container.partition_key.paths.is_empty() {
                return Err(ArmforgeError::ConfigInvalid {
                    name: container.name.clone(),
                    reason: "'partition_key.paths' must list at least one path".into(),
                });
            }
            for path in &container.partition_key.paths {
                require_non_empty(&container.name, "partition_key.paths", path)?;
            }
        }
        Ok(())
    }

    /// The account hosting the database, defaulting to `<name>-account`.
    pub fn account_ref(&self) -> ResourceRef {
        ResourceRef::from_settings(
            self.account_name.as_deref(),
            self.link_to_account.as_deref(),
        )
        .or_infer(|| ResourceName::new(&self.name).with_suffix("-account"))
    }

    pub fn finalize(&self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        let account_ref = self.account_ref();
        let account_name = account_ref.name().cloned().unwrap_or(ResourceName::EMPTY);
        let database_name = ResourceName::new(&self.name);

        let account = CosmosAccount {
            name: account_name.clone(),
            location: ctx.location_or(self.location.as_deref()),
            consistency: self.consistency,
            failover: self.failover.clone(),
        };
        let mut specs = vec![ResourceSpec::create_or_link(
            account_ref,
            Resource::CosmosAccount(account),
        )];

        specs.push(ResourceSpec::create(Resource::CosmosDatabase(
            CosmosDatabase {
                name: database_name.clone(),
                account: account_name.clone(),
                throughput: self.throughput,
            },
        )));

        for container in &self.containers {
            specs.push(ResourceSpec::create(Resource::CosmosContainer(
                CosmosContainer {
                    name: ResourceName::new(&container.name),
                    account: account_name.clone(),
                    database: database_name.clone(),
                    partition_key: container.partition_key.clone(),
                    included_paths: container.indexes.clone(),
                    excluded_paths: container.excluded_paths.clone(),
                },
            )));
        }

        Ok(specs)
    }
}
