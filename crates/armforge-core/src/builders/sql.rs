use serde::Deserialize;

use super::{require_non_empty, BuildContext, ResourceSpec};
use crate::error::Result;
use crate::model::{Resource, ResourceName, SecureParameter, SqlDatabase, SqlServer, SqlSku};

fn default_collation() -> String {
    "SQL_Latin1_General_CP1_CI_AS".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqlDatabaseConfig {
    pub name: String,
    #[serde(default)]
    pub sku: SqlSku,
    #[serde(default = "default_collation")]
    pub collation: String,
    #[serde(default = "default_true")]
    pub transparent_data_encryption: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqlServerConfig {
    pub name: String,
    pub location: Option<String>,
    pub admin_username: String,
    /// Deploy-time parameter holding the admin password.
    /// Defaults to `password-for-<name>`.
    pub admin_password_parameter: Option<String>,
    #[serde(default)]
    pub allow_azure_ips: bool,
    #[serde(default)]
    pub databases: Vec<SqlDatabaseConfig>,
}

impl SqlServerConfig {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.name, "name", &self.name)?;
        require_non_empty(&self.name, "admin_username", &self.admin_username)?;
        if let Some(param) = &self.admin_password_parameter {
            require_non_empty(&self.name, "admin_password_parameter", param)?;
        }
        for db in &self.databases {
            require_non_empty(&self.name, "databases.name", &db.name)?;
        }
        Ok(())
    }

    pub fn admin_password(&self) -> SecureParameter {
        match &self.admin_password_parameter {
            Some(param) => SecureParameter::new(param),
            None => SecureParameter::new(format!("password-for-{}", self.name)),
        }
    }

    pub fn finalize(&self, ctx: &BuildContext) -> Result<Vec<ResourceSpec>> {
        let databases = self
            .databases
            .iter()
            .map(|db| SqlDatabase {
                name: ResourceName::new(&db.name),
                sku: db.sku,
                collation: db.collation.clone(),
                transparent_data_encryption: db.transparent_data_encryption,
            })
            .collect();

        let server = SqlServer {
            name: ResourceName::new(&self.name),
            location: ctx.location_or(self.location.as_deref()),
            admin_login: self.admin_username.clone(),
            admin_password: self.admin_password(),
            allow_azure_ips: self.allow_azure_ips,
            databases,
        };
        Ok(vec![ResourceSpec::create(Resource::SqlServer(server))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_parameter_defaults_from_server_name() {
        let cfg: SqlServerConfig =
            toml::from_str("name = \"sqlsrv\"\nadmin_username = \"admin\"").unwrap();
        assert_eq!(cfg.admin_password().name(), "password-for-sqlsrv");
    }

    #[test]
    fn database_defaults() {
        let cfg: SqlServerConfig = toml::from_str(
            r#"
name = "sqlsrv"
admin_username = "admin"
databases = [{ name = "app" }]
"#,
        )
        .unwrap();
        let db = &cfg.databases[0];
        assert_eq!(db.sku, SqlSku::Basic);
        assert_eq!(db.collation, "SQL_Latin1_General_CP1_CI_AS");
        assert!(db.transparent_data_encryption);
    }
}
