//! Stack action command handlers.

use super::stack::stack_list;
use crate::client::HeatClient;
use crate::commands::StackArgs;
use crate::error::HeatResult;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Suspend a stack, then list stacks.
pub async fn action_suspend(client: &HeatClient, args: StackArgs) -> HeatResult<()> {
    client
        .actions()
        .suspend(&args.id)
        .await
        .map_err(|e| e.or_not_found("Stack", &args.id))?;

    stack_list(client).await
}

/// Resume a stack, then list stacks.
pub async fn action_resume(client: &HeatClient, args: StackArgs) -> HeatResult<()> {
    client
        .actions()
        .resume(&args.id)
        .await
        .map_err(|e| e.or_not_found("Stack", &args.id))?;

    stack_list(client).await
}
