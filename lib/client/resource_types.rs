//! Resource type operations.

use super::{HeatClient, Record, segment, take_list};
use crate::error::HeatResult;
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Resource type operations of a [`HeatClient`].
#[derive(Debug, Clone, Copy)]
pub struct ResourceTypeManager<'a> {
    client: &'a HeatClient,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> ResourceTypeManager<'a> {
    pub(crate) fn new(client: &'a HeatClient) -> Self {
        Self { client }
    }

    /// List the available resource types, one `resource_type` record each.
    pub async fn list(&self) -> HeatResult<Vec<Record>> {
        take_list(self.client.get("/resource_types").await?, "resource_types")
    }

    /// Get the schema of a resource type.
    pub async fn get(&self, resource_type: &str) -> HeatResult<Value> {
        let path = format!("/resource_types/{}", segment(resource_type));
        self.client.get(&path).await
    }
}
