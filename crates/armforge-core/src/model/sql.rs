use serde::Deserialize;

use super::{Location, ResourceName, SecureParameter};

/// Service objective of a single SQL database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SqlSku {
    Free,
    #[default]
    Basic,
    S0,
    S1,
    S2,
    S3,
    S4,
    P1,
    P2,
    P4,
    P6,
}

impl SqlSku {
    pub fn objective(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Basic => "Basic",
            Self::S0 => "S0",
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
            Self::S4 => "S4",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P4 => "P4",
            Self::P6 => "P6",
        }
    }

    pub fn edition(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Basic => "Basic",
            Self::S0 | Self::S1 | Self::S2 | Self::S3 | Self::S4 => "Standard",
            Self::P1 | Self::P2 | Self::P4 | Self::P6 => "Premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlDatabase {
    pub name: ResourceName,
    pub sku: SqlSku,
    pub collation: String,
    pub transparent_data_encryption: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlServer {
    pub name: ResourceName,
    pub location: Location,
    pub admin_login: String,
    pub admin_password: SecureParameter,
    /// Open the firewall to other Azure services.
    pub allow_azure_ips: bool,
    pub databases: Vec<SqlDatabase>,
}
