//! Event operations.

use super::{HeatClient, Record, segment, take_list, take_record};
use crate::error::HeatResult;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Event operations of a [`HeatClient`].
#[derive(Debug, Clone, Copy)]
pub struct EventManager<'a> {
    client: &'a HeatClient,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<'a> EventManager<'a> {
    pub(crate) fn new(client: &'a HeatClient) -> Self {
        Self { client }
    }

    /// List the events of a stack, or of one of its resources.
    pub async fn list(&self, stack_id: &str, resource_name: Option<&str>) -> HeatResult<Vec<Record>> {
        let stack = self.client.stacks().identifier(stack_id).await?;
        let path = match resource_name {
            Some(resource) => format!("/stacks/{}/resources/{}/events", stack, segment(resource)),
            None => format!("/stacks/{}/events", stack),
        };
        take_list(self.client.get(&path).await?, "events")
    }

    /// Get one event.
    pub async fn get(&self, stack_id: &str, resource_name: &str, event_id: &str) -> HeatResult<Record> {
        let stack = self.client.stacks().identifier(stack_id).await?;
        let path = format!(
            "/stacks/{}/resources/{}/events/{}",
            stack,
            segment(resource_name),
            segment(event_id)
        );
        take_record(self.client.get(&path).await?, "event")
    }
}
