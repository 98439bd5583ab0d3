//! Template expressions that read values from deployed resources.

use crate::model::ResourceName;

/// Connection string for a storage account, including its first access key.
pub fn storage_connection_string(account: &ResourceName) -> String {
    format!(
        "[concat('DefaultEndpointsProtocol=https;AccountName=', '{account}', ';AccountKey=', listKeys('{account}', '2017-10-01').keys[0].value)]"
    )
}

/// Instrumentation key of an app insights component.
pub fn instrumentation_key(component: &ResourceName) -> String {
    format!("[reference(concat('Microsoft.Insights/components/', '{component}')).InstrumentationKey]")
}

/// Primary master key of a Cosmos DB account.
pub fn cosmos_primary_key(account: &ResourceName) -> String {
    format!(
        "[listKeys(resourceId('Microsoft.DocumentDB/databaseAccounts', '{account}'), providers('Microsoft.DocumentDB','databaseAccounts').apiVersions[0]).primaryMasterKey]"
    )
}
