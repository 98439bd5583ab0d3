use std::collections::BTreeMap;

use serde::Deserialize;

use super::{Location, ResourceName};

/// App service plan size. `Y1` is the consumption (dynamic) plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WebAppSku {
    #[default]
    F1,
    D1,
    B1,
    B2,
    B3,
    S1,
    S2,
    S3,
    P1V2,
    P2V2,
    P3V2,
    Y1,
}

impl WebAppSku {
    pub fn name(self) -> &'static str {
        match self {
            Self::F1 => "F1",
            Self::D1 => "D1",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
            Self::P1V2 => "P1V2",
            Self::P2V2 => "P2V2",
            Self::P3V2 => "P3V2",
            Self::Y1 => "Y1",
        }
    }

    pub fn tier(self) -> &'static str {
        match self {
            Self::F1 => "Free",
            Self::D1 => "Shared",
            Self::B1 | Self::B2 | Self::B3 => "Basic",
            Self::S1 | Self::S2 | Self::S3 => "Standard",
            Self::P1V2 | Self::P2V2 | Self::P3V2 => "PremiumV2",
            Self::Y1 => "Dynamic",
        }
    }

    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Y1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerFarm {
    pub name: ResourceName,
    pub location: Location,
    pub sku: WebAppSku,
    /// Ignored by dynamic plans, which scale on their own.
    pub worker_count: u32,
}

impl ServerFarm {
    pub fn is_dynamic(&self) -> bool {
        self.sku.is_dynamic()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppInsights {
    pub name: ResourceName,
    pub location: Location,
    /// The web app this component monitors, rendered as a hidden-link tag.
    pub linked_web_app: Option<ResourceName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebApp {
    pub name: ResourceName,
    pub location: Location,
    pub server_farm: ResourceName,
    pub app_insights: Option<ResourceName>,
    pub always_on: bool,
    pub app_settings: BTreeMap<String, String>,
    pub extensions: Vec<String>,
}

impl WebApp {
    /// Siblings that must be deployed before this web app.
    pub fn dependencies(&self) -> Vec<&ResourceName> {
        std::iter::once(&self.server_farm)
            .chain(self.app_insights.as_ref())
            .collect()
    }
}
