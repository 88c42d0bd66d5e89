//! Resource type command handlers.

use crate::client::HeatClient;
use crate::error::HeatResult;
use crate::output::{json_pretty, print_list};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// List the available resource types.
pub async fn resource_type_list(client: &HeatClient) -> HeatResult<()> {
    let types = client.resource_types().list().await?;
    print_list(&types, &["resource_type"], None);
    Ok(())
}

/// Print the schema of a resource type.
pub async fn resource_type_show(client: &HeatClient, resource_type: &str) -> HeatResult<()> {
    let schema = client
        .resource_types()
        .get(resource_type)
        .await
        .map_err(|e| e.or_not_found("Resource Type", resource_type))?;

    println!("{}", json_pretty(&schema));
    Ok(())
}
