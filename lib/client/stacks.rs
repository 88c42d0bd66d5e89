//! Stack operations.

use super::{HeatClient, Record, segment, take_list, take_record};
use crate::error::{HeatError, HeatResult};
use crate::request::StackFields;
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Stack operations of a [`HeatClient`].
#[derive(Debug, Clone, Copy)]
pub struct StackManager<'a> {
    client: &'a HeatClient,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> StackManager<'a> {
    pub(crate) fn new(client: &'a HeatClient) -> Self {
        Self { client }
    }

    /// List the user's stacks.
    pub async fn list(&self) -> HeatResult<Vec<Record>> {
        take_list(self.client.get("/stacks").await?, "stacks")
    }

    /// Get a stack by name or ID.
    pub async fn get(&self, stack_id: &str) -> HeatResult<Record> {
        let path = format!("/stacks/{}", stack_path(stack_id));
        take_record(self.client.get(&path).await?, "stack")
    }

    /// Create a stack.
    pub async fn create(&self, fields: &StackFields) -> HeatResult<Value> {
        self.client.post("/stacks", fields).await
    }

    /// Update the stack named by `fields.stack_id`.
    pub async fn update(&self, fields: &StackFields) -> HeatResult<Value> {
        let stack_id = fields
            .stack_id
            .as_deref()
            .ok_or_else(|| HeatError::Config("A stack name or ID is required".into()))?;

        let path = format!("/stacks/{}", stack_path(stack_id));
        self.client.put(&path, fields).await
    }

    /// Delete a stack.
    pub async fn delete(&self, stack_id: &str) -> HeatResult<()> {
        let path = format!("/stacks/{}", stack_path(stack_id));
        self.client.delete(&path).await?;
        Ok(())
    }

    /// Get the template a stack was created from.
    pub async fn template(&self, stack_id: &str) -> HeatResult<Value> {
        let path = format!("/stacks/{}/template", stack_path(stack_id));
        self.client.get(&path).await
    }

    /// Validate a template.
    pub async fn validate(&self, fields: &StackFields) -> HeatResult<Value> {
        self.client.post("/validate", fields).await
    }

    /// Canonical `name/id` path of a stack given either its name or its ID.
    pub async fn identifier(&self, stack_id: &str) -> HeatResult<String> {
        let stack = self.get(stack_id).await?;

        match (
            stack.get("stack_name").and_then(Value::as_str),
            stack.get("id").and_then(Value::as_str),
        ) {
            (Some(name), Some(id)) => Ok(format!("{}/{}", segment(name), segment(id))),
            _ => Err(HeatError::Generic(format!(
                "Unexpected response: stack '{}' has no name or id",
                stack_id
            ))),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Encode a user-supplied stack reference, which may already be `name/id`.
pub(crate) fn stack_path(stack_id: &str) -> String {
    stack_id.split('/').map(segment).collect::<Vec<_>>().join("/")
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_path() {
        assert_eq!(stack_path("teststack"), "teststack");
        assert_eq!(
            stack_path("teststack/1b2c-3d"),
            "teststack/1b2c-3d"
        );
        assert_eq!(stack_path("my stack"), "my%20stack");
    }

    #[tokio::test]
    async fn test_update_requires_stack_id() {
        let client = super::super::tests::client();
        let result = client.stacks().update(&StackFields::default()).await;
        assert!(matches!(result, Err(HeatError::Config(_))));
    }
}
