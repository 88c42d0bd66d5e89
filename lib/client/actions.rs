//! Stack actions.

use super::HeatClient;
use crate::error::HeatResult;
use serde_json::{Map, Value};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Stack action operations of a [`HeatClient`].
#[derive(Debug, Clone, Copy)]
pub struct ActionManager<'a> {
    client: &'a HeatClient,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> ActionManager<'a> {
    pub(crate) fn new(client: &'a HeatClient) -> Self {
        Self { client }
    }

    /// Suspend a stack.
    pub async fn suspend(&self, stack_id: &str) -> HeatResult<()> {
        self.action(stack_id, action_body("suspend")).await
    }

    /// Resume a suspended stack.
    pub async fn resume(&self, stack_id: &str) -> HeatResult<()> {
        self.action(stack_id, action_body("resume")).await
    }

    async fn action(&self, stack_id: &str, body: Value) -> HeatResult<()> {
        let stack = self.client.stacks().identifier(stack_id).await?;
        let path = format!("/stacks/{}/actions", stack);
        self.client.post(&path, &body).await?;
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn action_body(action: &str) -> Value {
    Value::Object(Map::from_iter([(action.to_string(), Value::Null)]))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
