use serde::Deserialize;

use super::{Location, ResourceName};

/// Replication tier of a storage account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum StorageSku {
    #[default]
    #[serde(rename = "Standard_LRS")]
    StandardLrs,
    #[serde(rename = "Standard_GRS")]
    StandardGrs,
    #[serde(rename = "Standard_RAGRS")]
    StandardRagrs,
    #[serde(rename = "Standard_ZRS")]
    StandardZrs,
    #[serde(rename = "Premium_LRS")]
    PremiumLrs,
}

impl StorageSku {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StandardLrs => "Standard_LRS",
            Self::StandardGrs => "Standard_GRS",
            Self::StandardRagrs => "Standard_RAGRS",
            Self::StandardZrs => "Standard_ZRS",
            Self::PremiumLrs => "Premium_LRS",
        }
    }
}

/// Anonymous read access granted on a blob container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobAccess {
    #[default]
    Private,
    Container,
    Blob,
}

impl BlobAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "None",
            Self::Container => "Container",
            Self::Blob => "Blob",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlobContainer {
    pub name: String,
    #[serde(default)]
    pub access: BlobAccess,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageAccount {
    pub name: ResourceName,
    pub location: Location,
    pub sku: StorageSku,
    pub containers: Vec<BlobContainer>,
}
