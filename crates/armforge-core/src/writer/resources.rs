use serde_json::{json, Value};
use tracing::debug;

use crate::model::{
    AppInsights, ConsistencyPolicy, ContainerGroup, CosmosAccount, CosmosContainer,
    CosmosDatabase, FailoverPolicy, Resource, ServerFarm, SqlDatabase, SqlServer, StorageAccount,
    WebApp,
};

// Resource types and API versions are pinned to one provider schema revision.
mod api {
    pub const STORAGE: &str = "2018-07-01";
    pub const BLOB_CONTAINERS: &str = "2018-03-01-preview";
    pub const INSIGHTS: &str = "2014-04-01";
    pub const SERVER_FARMS: &str = "2018-02-01";
    pub const SITES: &str = "2016-08-01";
    pub const CONTAINER_GROUPS: &str = "2018-10-01";
    pub const DOCUMENT_DB: &str = "2019-08-01";
    pub const SQL_SERVERS: &str = "2014-04-01-preview";
    pub const SQL_DATABASES: &str = "2015-01-01";
}

/// Render one resource into its template fragment.
pub fn render_resource(resource: &Resource) -> Value {
    debug!(kind = %resource.kind(), name = %resource.name(), "rendering resource");
    match resource {
        Resource::StorageAccount(r) => storage_account(r),
        Resource::AppInsights(r) => app_insights(r),
        Resource::ServerFarm(r) => server_farm(r),
        Resource::WebApp(r) => web_app(r),
        Resource::ContainerGroup(r) => container_group(r),
        Resource::CosmosAccount(r) => cosmos_account(r),
        Resource::CosmosDatabase(r) => cosmos_database(r),
        Resource::CosmosContainer(r) => cosmos_container(r),
        Resource::SqlServer(r) => sql_server(r),
    }
}

/// Attach nested child resources, omitting the key when there are none.
fn with_children(mut fragment: Value, children: Vec<Value>) -> Value {
    if !children.is_empty() {
        fragment["resources"] = Value::Array(children);
    }
    fragment
}

fn storage_account(account: &StorageAccount) -> Value {
    let containers = account
        .containers
        .iter()
        .map(|c| {
            json!({
                "type": "blobServices/containers",
                "apiVersion": api::BLOB_CONTAINERS,
                "name": format!("default/{}", c.name),
                "dependsOn": [account.name.as_str()],
                "properties": { "publicAccess": c.access.as_str() },
            })
        })
        .collect();

    with_children(
        json!({
            "type": "Microsoft.Storage/storageAccounts",
            "sku": { "name": account.sku.as_str() },
            "kind": "StorageV2",
            "name": account.name.as_str(),
            "apiVersion": api::STORAGE,
            "location": account.location.as_str(),
        }),
        containers,
    )
}

fn app_insights(component: &AppInsights) -> Value {
    let mut tags = json!({ "displayName": "AppInsightsComponent" });
    let application_id = match &component.linked_web_app {
        Some(site) => {
            let hidden_link = format!(
                "[concat('hidden-link:', resourceGroup().id, '/providers/Microsoft.Web/sites/', '{site}')]"
            );
            tags[hidden_link] = json!("Resource");
            site.as_str()
        }
        None => component.name.as_str(),
    };

    json!({
        "type": "Microsoft.Insights/components",
        "kind": "web",
        "name": component.name.as_str(),
        "location": component.location.as_str(),
        "apiVersion": api::INSIGHTS,
        "tags": tags,
        "properties": {
            "name": component.name.as_str(),
            "Application_Type": "web",
            "ApplicationId": application_id,
        },
    })
}

fn server_farm(farm: &ServerFarm) -> Value {
    let mut sku = json!({
        "name": farm.sku.name(),
        "tier": farm.sku.tier(),
        "size": farm.sku.name(),
    });
    let properties = if farm.is_dynamic() {
        sku["family"] = json!("Y");
        sku["capacity"] = json!(0);
        json!({ "name": farm.name.as_str(), "computeMode": "Dynamic" })
    } else {
        sku["numberOfWorkers"] = json!(farm.worker_count);
        json!({ "name": farm.name.as_str(), "perSiteScaling": false, "reserved": false })
    };

    json!({
        "type": "Microsoft.Web/serverfarms",
        "sku": sku,
        "name": farm.name.as_str(),
        "apiVersion": api::SERVER_FARMS,
        "location": farm.location.as_str(),
        "properties": properties,
    })
}

fn web_app(app: &WebApp) -> Value {
    let app_settings: Vec<Value> = app
        .app_settings
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();
    let depends_on: Vec<&str> = app.dependencies().into_iter().map(|n| n.as_str()).collect();
    let extensions = app
        .extensions
        .iter()
        .map(|ext| {
            json!({
                "type": "siteextensions",
                "name": ext,
                "apiVersion": api::SITES,
                "dependsOn": [app.name.as_str()],
                "location": app.location.as_str(),
            })
        })
        .collect();

    with_children(
        json!({
            "type": "Microsoft.Web/sites",
            "name": app.name.as_str(),
            "apiVersion": api::SITES,
            "location": app.location.as_str(),
            "kind": "app",
            "dependsOn": depends_on,
            "properties": {
                "serverFarmId": app.server_farm.as_str(),
                "siteConfig": {
                    "alwaysOn": app.always_on,
                    "appSettings": app_settings,
                },
            },
        }),
        extensions,
    )
}

fn container_group(group: &ContainerGroup) -> Value {
    let containers: Vec<Value> = group
        .containers
        .iter()
        .map(|c| {
            let ports: Vec<Value> = c.ports.iter().map(|p| json!({ "port": p })).collect();
            json!({
                "name": c.name.as_str(),
                "properties": {
                    "image": c.image,
                    "ports": ports,
                    "resources": {
                        "requests": { "cpu": c.cpu, "memoryInGB": c.memory_gb },
                    },
                },
            })
        })
        .collect();
    let ip_ports: Vec<Value> = group
        .ip_address
        .ports
        .iter()
        .map(|b| json!({ "protocol": b.protocol.as_str(), "port": b.port }))
        .collect();

    json!({
        "type": "Microsoft.ContainerInstance/containerGroups",
        "apiVersion": api::CONTAINER_GROUPS,
        "name": group.name.as_str(),
        "location": group.location.as_str(),
        "properties": {
            "containers": containers,
            "osType": group.os_type.as_str(),
            "restartPolicy": group.restart_policy.as_str(),
            "ipAddress": {
                "type": group.ip_address.kind.as_str(),
                "ports": ip_ports,
            },
        },
    })
}

fn cosmos_account(account: &CosmosAccount) -> Value {
    let mut consistency = json!({ "defaultConsistencyLevel": account.consistency.level() });
    if let ConsistencyPolicy::BoundedStaleness {
        max_staleness_prefix,
        max_interval_seconds,
    } = account.consistency
    {
        consistency["maxStalenessPrefix"] = json!(max_staleness_prefix);
        consistency["maxIntervalInSeconds"] = json!(max_interval_seconds);
    }

    let mut properties = json!({
        "consistencyPolicy": consistency,
        "databaseAccountOfferType": "Standard",
    });
    let secondary = match &account.failover {
        FailoverPolicy::NoFailover => None,
        FailoverPolicy::AutoFailover(secondary) => {
            properties["enableAutomaticFailover"] = json!(true);
            Some(secondary)
        }
        FailoverPolicy::MultiMaster(secondary) => {
            properties["enableMultipleWriteLocations"] = json!(true);
            Some(secondary)
        }
    };
    if let Some(secondary) = secondary {
        properties["locations"] = json!([
            { "locationName": account.location.as_str(), "failoverPriority": 0 },
            { "locationName": secondary.as_str(), "failoverPriority": 1 },
        ]);
    }

    json!({
        "type": "Microsoft.DocumentDB/databaseAccounts",
        "kind": "GlobalDocumentDB",
        "name": account.name.as_str(),
        "apiVersion": api::DOCUMENT_DB,
        "location": account.location.as_str(),
        "properties": properties,
    })
}

fn cosmos_database(db: &CosmosDatabase) -> Value {
    json!({
        "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases",
        "name": format!("{}/{}", db.account, db.name),
        "apiVersion": api::DOCUMENT_DB,
        "dependsOn": [db.account.as_str()],
        "properties": {
            "resource": { "id": db.name.as_str() },
            "options": { "throughput": db.throughput },
        },
    })
}

fn cosmos_container(container: &CosmosContainer) -> Value {
    let included: Vec<Value> = container
        .included_paths
        .iter()
        .map(|p| {
            let indexes: Vec<Value> = p
                .indexes
                .iter()
                .map(|i| {
                    json!({
                        "kind": i.kind.as_str(),
                        "dataType": i.data_type.as_str().to_lowercase(),
                        "precision": -1,
                    })
                })
                .collect();
            json!({ "path": p.path, "indexes": indexes })
        })
        .collect();
    let excluded: Vec<Value> = container
        .excluded_paths
        .iter()
        .map(|p| json!({ "path": p }))
        .collect();

    json!({
        "type": "Microsoft.DocumentDB/databaseAccounts/sqlDatabases/containers",
        "name": format!("{}/{}/{}", container.account, container.database, container.name),
        "apiVersion": api::DOCUMENT_DB,
        "dependsOn": [format!("{}/{}", container.account, container.database)],
        "properties": {
            "resource": {
                "id": container.name.as_str(),
                "partitionKey": {
                    "paths": container.partition_key.paths,
                    "kind": container.partition_key.kind.as_str(),
                },
                "indexingPolicy": {
                    "indexingMode": "consistent",
                    "includedPaths": included,
                    "excludedPaths": excluded,
                },
            },
        },
    })
}

fn sql_server(server: &SqlServer) -> Value {
    let mut children = Vec::new();
    if server.allow_azure_ips {
        children.push(json!({
            "type": "firewallrules",
            "name": "AllowAllWindowsAzureIps",
            "apiVersion": api::SQL_SERVERS,
            "location": server.location.as_str(),
            "properties": { "endIpAddress": "0.0.0.0", "startIpAddress": "0.0.0.0" },
            "dependsOn": [server.name.as_str()],
        }));
    }
    children.extend(server.databases.iter().map(|db| sql_database(server, db)));

    with_children(
        json!({
            "type": "Microsoft.Sql/servers",
            "name": server.name.as_str(),
            "apiVersion": api::SQL_SERVERS,
            "location": server.location.as_str(),
            "tags": { "displayName": server.name.as_str() },
            "properties": {
                "administratorLogin": server.admin_login,
                "administratorLoginPassword": server.admin_password.as_arm_expression(),
                "version": "12.0",
            },
        }),
        children,
    )
}

fn sql_database(server: &SqlServer, db: &SqlDatabase) -> Value {
    let mut children = Vec::new();
    if db.transparent_data_encryption {
        children.push(json!({
            "comments": "Transparent Data Encryption",
            "name": "current",
            "type": "transparentDataEncryption",
            "apiVersion": api::SQL_SERVERS,
            "properties": { "status": "Enabled" },
            "dependsOn": [db.name.as_str()],
        }));
    }

    with_children(
        json!({
            "type": "databases",
            "name": db.name.as_str(),
            "apiVersion": api::SQL_DATABASES,
            "location": server.location.as_str(),
            "tags": { "displayName": db.name.as_str() },
            "properties": {
                "edition": db.sku.edition(),
                "collation": db.collation,
                "requestedServiceObjectiveName": db.sku.objective(),
            },
            "dependsOn": [server.name.as_str()],
        }),
        children,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        BlobAccess, BlobContainer, ContainerInstance, DataType, IncludedPath, Index, IndexKind,
        IpAddress, Location, OsType, PartitionKey, PortBinding, Protocol, RestartPolicy,
        SecureParameter, SqlSku, StorageSku, WebAppSku,
    };

    fn farm(sku: WebAppSku) -> Resource {
        Resource::ServerFarm(ServerFarm {
            name: "farm".into(),
            location: Location::default(),
            sku,
            worker_count: 3,
        })
    }

    fn cosmos(consistency: ConsistencyPolicy, failover: FailoverPolicy) -> Value {
        render_resource(&Resource::CosmosAccount(CosmosAccount {
            name: "acct".into(),
            location: Location::new("westeurope"),
            consistency,
            failover,
        }))
    }

    #[test]
    fn dynamic_farm_sku_shape() {
        let sku = &render_resource(&farm(WebAppSku::Y1))["sku"];
        assert_eq!(sku["family"], "Y");
        assert_eq!(sku["capacity"], 0);
        assert!(sku.get("numberOfWorkers").is_none());
    }

    #[test]
    fn fixed_farm_sku_shape() {
        let rendered = render_resource(&farm(WebAppSku::S1));
        assert_eq!(
            rendered["sku"],
            json!({ "name": "S1", "tier": "Standard", "size": "S1", "numberOfWorkers": 3 })
        );
        assert_eq!(rendered["properties"]["perSiteScaling"], false);
    }

    #[test]
    fn bounded_staleness_policy() {
        let rendered = cosmos(
            ConsistencyPolicy::BoundedStaleness {
                max_staleness_prefix: 100,
                max_interval_seconds: 5,
            },
            FailoverPolicy::NoFailover,
        );
        assert_eq!(
            rendered["properties"]["consistencyPolicy"],
            json!({
                "defaultConsistencyLevel": "BoundedStaleness",
                "maxStalenessPrefix": 100,
                "maxIntervalInSeconds": 5,
            })
        );
        assert!(rendered["properties"].get("locations").is_none());
    }

    #[test]
    fn session_policy_has_only_level() {
        let rendered = cosmos(ConsistencyPolicy::Session, FailoverPolicy::NoFailover);
        assert_eq!(
            rendered["properties"]["consistencyPolicy"],
            json!({ "defaultConsistencyLevel": "Session" })
        );
    }

    #[test]
    fn multi_master_lists_locations_by_priority() {
        let rendered = cosmos(
            ConsistencyPolicy::Eventual,
            FailoverPolicy::MultiMaster(Location::new("northeurope")),
        );
        let props = &rendered["properties"];
        assert_eq!(props["enableMultipleWriteLocations"], true);
        assert!(props.get("enableAutomaticFailover").is_none());
        assert_eq!(
            props["locations"],
            json!([
                { "locationName": "westeurope", "failoverPriority": 0 },
                { "locationName": "northeurope", "failoverPriority": 1 },
            ])
        );
    }

    #[test]
    fn container_group_shape() {
        let group = ContainerGroup {
            name: "g".into(),
            location: Location::default(),
            os_type: OsType::Linux,
            restart_policy: RestartPolicy::OnFailure,
            ip_address: IpAddress {
                kind: Default::default(),
                ports: vec![PortBinding {
                    protocol: Protocol::Tcp,
                    port: 80,
                }],
            },
            containers: vec![ContainerInstance {
                name: "web".into(),
                image: "nginx:1.17.6".into(),
                ports: vec![80],
                cpu: 1,
                memory_gb: 1.5,
            }],
        };
        let rendered = render_resource(&Resource::ContainerGroup(group));
        assert_eq!(rendered["properties"]["restartPolicy"], "OnFailure");
        assert_eq!(
            rendered["properties"]["ipAddress"],
            json!({ "type": "Public", "ports": [{ "protocol": "TCP", "port": 80 }] })
        );
        assert_eq!(
            rendered["properties"]["containers"][0]["properties"]["resources"],
            json!({ "requests": { "cpu": 1, "memoryInGB": 1.5 } })
        );
    }

    #[test]
    fn sql_database_nests_encryption() {
        let server = SqlServer {
            name: "srv".into(),
            location: Location::default(),
            admin_login: "admin".into(),
            admin_password: SecureParameter::new("password-for-srv"),
            allow_azure_ips: true,
            databases: vec![SqlDatabase {
                name: "app".into(),
                sku: SqlSku::S0,
                collation: "SQL_Latin1_General_CP1_CI_AS".into(),
                transparent_data_encryption: true,
            }],
        };
        let rendered = render_resource(&Resource::SqlServer(server));
        assert_eq!(
            rendered["properties"]["administratorLoginPassword"],
            "[parameters('password-for-srv')]"
        );
        let children = rendered["resources"].as_array().unwrap();
        assert_eq!(children[0]["name"], "AllowAllWindowsAzureIps");
        let db = &children[1];
        assert_eq!(db["dependsOn"], json!(["srv"]));
        assert_eq!(db["properties"]["edition"], "Standard");
        assert_eq!(db["resources"][0]["type"], "transparentDataEncryption");
        assert_eq!(db["resources"][0]["dependsOn"], json!(["app"]));
    }

    #[test]
    fn index_data_type_is_lowercase() {
        let container = CosmosContainer {
            name: "items".into(),
            account: "acct".into(),
            database: "db".into(),
            partition_key: PartitionKey {
                paths: vec!["/id".into()],
                kind: IndexKind::Hash,
            },
            included_paths: vec![IncludedPath {
                path: "/*".into(),
                indexes: vec![Index {
                    data_type: DataType::Number,
                    kind: IndexKind::Range,
                }],
            }],
            excluded_paths: Vec::new(),
        };
        let rendered = render_resource(&Resource::CosmosContainer(container));
        assert_eq!(rendered["name"], "acct/db/items");
        assert_eq!(rendered["dependsOn"], json!(["acct/db"]));
        let index = &rendered["properties"]["resource"]["indexingPolicy"]["includedPaths"][0]
            ["indexes"][0];
        assert_eq!(index["dataType"], "number");
        assert_eq!(index["kind"], "Range");
    }

    #[test]
    fn storage_containers_nest_under_account() {
        let rendered = render_resource(&Resource::StorageAccount(StorageAccount {
            name: "store".into(),
            location: Location::new("westeurope"),
            sku: StorageSku::StandardGrs,
            containers: vec![
                BlobContainer {
                    name: "images".into(),
                    access: BlobAccess::Blob,
                },
                BlobContainer {
                    name: "invoices".into(),
                    access: BlobAccess::Private,
                },
            ],
        }));

        assert_eq!(rendered["sku"], json!({ "name": "Standard_GRS" }));
        assert_eq!(rendered["kind"], "StorageV2");
        assert_eq!(
            rendered["resources"],
            json!([
                {
                    "type": "blobServices/containers",
                    "apiVersion": "2018-03-01-preview",
                    "name": "default/images",
                    "dependsOn": ["store"],
                    "properties": { "publicAccess": "Blob" },
                },
                {
                    "type": "blobServices/containers",
                    "apiVersion": "2018-03-01-preview",
                    "name": "default/invoices",
                    "dependsOn": ["store"],
                    "properties": { "publicAccess": "None" },
                },
            ])
        );
    }

    #[test]
    fn storage_without_containers_has_no_children() {
        let rendered = render_resource(&Resource::StorageAccount(StorageAccount {
            name: "store".into(),
            location: Location::default(),
            sku: StorageSku::default(),
            containers: Vec::new(),
        }));
        assert!(rendered.get("resources").is_none());
        assert_eq!(rendered["sku"]["name"], "Standard_LRS");
    }

    #[test]
    fn app_insights_tags_linked_site() {
        let rendered = render_resource(&Resource::AppInsights(AppInsights {
            name: "site-ai".into(),
            location: Location::new("westeurope"),
            linked_web_app: Some("site".into()),
        }));
        assert_eq!(
            rendered["tags"],
            json!({
                "displayName": "AppInsightsComponent",
                "[concat('hidden-link:', resourceGroup().id, '/providers/Microsoft.Web/sites/', 'site')]": "Resource",
            })
        );
        assert_eq!(rendered["properties"]["ApplicationId"], "site");
        assert_eq!(rendered["apiVersion"], "2014-04-01");
    }

    #[test]
    fn standalone_app_insights_has_no_hidden_link() {
        let rendered = render_resource(&Resource::AppInsights(AppInsights {
            name: "shared-ai".into(),
            location: Location::default(),
            linked_web_app: None,
        }));
        assert_eq!(rendered["tags"], json!({ "displayName": "AppInsightsComponent" }));
        assert_eq!(rendered["properties"]["ApplicationId"], "shared-ai");
    }
}
