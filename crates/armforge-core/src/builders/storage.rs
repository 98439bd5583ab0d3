use serde::Deserialize;

use super::{require_non_empty, BuildContext, ResourceSpec};
use crate::error::Result;
use crate::model::{BlobContainer, Resource, ResourceName, StorageAccount, StorageSku};

#[derive(Debug, Clone, Deserialize)]
pub struct StorageAccountConfig {
    pub name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub sku: StorageSku,
    #[serde(default)]
    pub containers: Vec<BlobContainer>,
}

impl StorageAccountConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name", &self.name)?;
        for container in &self.containers {
            require_non_empty(&self.name, "containers.name", &container.name)?;
        }
        Ok(())
    }

    pub fn finalize(&self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        let account = StorageAccount {
            name: ResourceName::new(&self.name),
            location: ctx.location_or(self.location.as_deref()),
            sku: self.sku,
            containers: self.containers.clone(),
        };
        Ok(vec![ResourceSpec::create(Resource::StorageAccount(account))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::Contribution;
    use crate::model::{BlobAccess, ResourceRef};

    #[test]
    fn finalize_creates_account_with_containers() {
        let cfg: StorageAccountConfig = toml::from_str(
            r#"
name = "store"
sku = "Standard_RAGRS"
containers = [{ name = "images", access = "container" }, { name = "logs" }]
"#,
        )
        .unwrap();
        cfg.validate().unwrap();
        let specs = cfg.finalize(&BuildContext::default()).unwrap();

        assert_eq!(specs.len(), 1);
        assert_eq!(
            specs[0].reference,
            ResourceRef::AutomaticallyCreated("store".into())
        );
        let Contribution::Definition(Resource::StorageAccount(account)) = &specs[0].contribution
        else {
            panic!("expected storage account definition");
        };
        assert_eq!(account.sku, StorageSku::StandardRagrs);
        assert_eq!(account.location.as_str(), "westeurope");
        assert_eq!(account.containers[0].access, BlobAccess::Container);
        assert_eq!(account.containers[1].access, BlobAccess::Private);
    }

    #[test]
    fn blank_container_name_rejected() {
        let cfg: StorageAccountConfig =
            toml::from_str("name = \"store\"\ncontainers = [{ name = \"\" }]").unwrap();
        assert!(cfg.validate().is_err());
    }
}
