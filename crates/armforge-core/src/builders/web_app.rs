use std::collections::BTreeMap;

use serde::Deserialize;

use super::{require_non_empty, require_one_of, BuildContext, ResourceSpec};
use crate::error::Result;
use crate::expressions;
use crate::model::{
    AppInsights, Resource, ResourceName, ResourceRef, ServerFarm, WebApp, WebAppSku,
};

fn default_workers() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebAppConfig {
    pub name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub sku: WebAppSku,
    #[serde(default = "default_workers")]
    pub workers: u32,
    #[serde(default)]
    pub always_on: bool,
    #[serde(default)]
    pub app_settings: BTreeMap<String, String>,
    /// Site extensions installed into the web app, e.g. `AspNetCoreRuntime.3.0.x64`.
    #[serde(default)]
    pub extensions: Vec<String>,

    pub service_plan_name: Option<String>,
    pub link_to_service_plan: Option<String>,

    /// Set to false to deploy without monitoring.
    #[serde(default = "default_true")]
    pub app_insights: bool,
    pub app_insights_name: Option<String>,
    pub link_to_app_insights: Option<String>,
}

impl WebAppConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name", &self.name)?;
        for extension in &self.extensions {
            require_non_empty(&self.name, "extensions", extension)?;
        }
        require_one_of(
            &self.name,
            ("service_plan_name", self.service_plan_name.as_ref()),
            ("link_to_service_plan", self.link_to_service_plan.as_ref()),
        )?;
        require_one_of(
            &self.name,
            ("app_insights_name", self.app_insights_name.as_ref()),
            ("link_to_app_insights", self.link_to_app_insights.as_ref()),
        )
    }

    pub fn service_plan(&self) -> ResourceRef {
        ResourceRef::from_settings(
            self.service_plan_name.as_deref(),
            self.link_to_service_plan.as_deref(),
        )
        .or_infer(|| ResourceName::new(&self.name).with_suffix("-farm"))
    }

    /// `None` when monitoring is disabled.
    pub fn app_insights_ref(&self) -> Option<ResourceRef> {
        if !self.app_insights {
            return None;
        }
        let reference = ResourceRef::from_settings(
            self.app_insights_name.as_deref(),
            self.link_to_app_insights.as_deref(),
        )
        .or_infer(|| ResourceName::new(&self.name).with_suffix("-ai"));
        Some(reference)
    }

    /// Produces the server farm, the app insights component (when enabled)
    /// and the web app itself, in that order.
    pub fn finalize(&self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        let name = ResourceName::new(&self.name);
        let location = ctx.location_or(self.location.as_deref());
        let mut specs = Vec::new();

        let farm_ref = self.service_plan();
        let farm_name = farm_ref.name().cloned().unwrap_or(ResourceName::EMPTY);
        let farm = ServerFarm {
            name: farm_name.clone(),
            location: location.clone(),
            sku: self.sku,
            worker_count: self.workers,
        };
        specs.push(ResourceSpec::create_or_link(
            farm_ref,
            Resource::ServerFarm(farm),
        ));

        let mut app_settings = self.app_settings.clone();
        let ai_name = match self.app_insights_ref() {
            Some(ai_ref) => {
                let ai_name = ai_ref.name().cloned().unwrap_or(ResourceName::EMPTY);
                app_settings.insert(
                    "APPINSIGHTS_INSTRUMENTATIONKEY".to_string(),
                    expressions::instrumentation_key(&ai_name),
                );
                let component = AppInsights {
                    name: ai_name.clone(),
                    location: location.clone(),
                    linked_web_app: Some(name.clone()),
                };
                specs.push(ResourceSpec::create_or_link(
                    ai_ref,
                    Resource::AppInsights(component),
                ));
                Some(ai_name)
            }
            None => None,
        };

        let web_app = WebApp {
            name,
            location,
            server_farm: farm_name,
            app_insights: ai_name,
            always_on: self.always_on,
            app_settings,
            extensions: self.extensions.clone(),
        };
        specs.push(ResourceSpec::create(Resource::WebApp(web_app)));

        Ok(specs)
    }
}
