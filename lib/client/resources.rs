//! Resource operations.

use super::{HeatClient, Record, segment, take_list, take_record};
use crate::error::HeatResult;
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Resource operations of a [`HeatClient`].
#[derive(Debug, Clone, Copy)]
pub struct ResourceManager<'a> {
    client: &'a HeatClient,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> ResourceManager<'a> {
    pub(crate) fn new(client: &'a HeatClient) -> Self {
        Self { client }
    }

    /// List the resources of a stack.
    pub async fn list(&self, stack_id: &str) -> HeatResult<Vec<Record>> {
        let stack = self.client.stacks().identifier(stack_id).await?;
        let path = format!("/stacks/{}/resources", stack);
        take_list(self.client.get(&path).await?, "resources")
    }

    /// Get one resource of a stack.
    pub async fn get(&self, stack_id: &str, resource_name: &str) -> HeatResult<Record> {
        let stack = self.client.stacks().identifier(stack_id).await?;
        let path = format!("/stacks/{}/resources/{}", stack, segment(resource_name));
        take_record(self.client.get(&path).await?, "resource")
    }

    /// Get the metadata of one resource.
    pub async fn metadata(&self, stack_id: &str, resource_name: &str) -> HeatResult<Value> {
        let stack = self.client.stacks().identifier(stack_id).await?;
        let path = format!(
            "/stacks/{}/resources/{}/metadata",
            stack,
            segment(resource_name)
        );

        let mut body = self.client.get(&path).await?;
        Ok(body
            .get_mut("metadata")
            .map(Value::take)
            .unwrap_or(body))
    }

    /// Generate a provider template for a resource type.
    pub async fn generate_template(&self, resource_name: &str) -> HeatResult<Value> {
        let path = format!("/resource_types/{}/template", segment(resource_name));
        self.client.get(&path).await
    }
}
