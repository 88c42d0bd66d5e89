//! Stack command handlers.

use crate::client::HeatClient;
use crate::commands::{CreateArgs, StackArgs, UpdateArgs};
use crate::error::HeatResult;
use crate::fetch::UrlFetcher;
use crate::output::{Formatter, print_dict, print_list};
use crate::request::{StackFields, StackInputs};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const STACK_LIST_FIELDS: &[&str] = &["id", "stack_name", "stack_status", "creation_time"];

const STACK_SHOW_FORMATTERS: &[(&str, Formatter)] = &[
    ("description", Formatter::TextWrap),
    ("template_description", Formatter::TextWrap),
    ("stack_status_reason", Formatter::TextWrap),
    ("parameters", Formatter::Json),
    ("outputs", Formatter::Json),
    ("links", Formatter::Links),
];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Create a stack, then list stacks.
pub async fn stack_create(client: &HeatClient, args: CreateArgs) -> HeatResult<()> {
    let references = UrlFetcher::new(client.http().clone());
    let inputs = StackInputs::gather(&args.template, client, &references).await?;

    let fields = StackFields::create(args.name, args.create_timeout, args.enable_rollback, inputs);
    client.stacks().create(&fields).await?;

    stack_list(client).await
}

/// Update a stack, then list stacks.
pub async fn stack_update(client: &HeatClient, args: UpdateArgs) -> HeatResult<()> {
    let references = UrlFetcher::new(client.http().clone());
    let inputs = StackInputs::gather(&args.template, client, &references).await?;

    let fields = StackFields::update(&args.id, inputs);
    client
        .stacks()
        .update(&fields)
        .await
        .map_err(|e| e.or_not_found("Stack", &args.id))?;

    stack_list(client).await
}

/// Delete a stack, then list stacks.
pub async fn stack_delete(client: &HeatClient, args: StackArgs) -> HeatResult<()> {
    client
        .stacks()
        .delete(&args.id)
        .await
        .map_err(|e| e.or_not_found("Stack", &args.id))?;

    stack_list(client).await
}

/// Show the details of a stack.
pub async fn stack_show(client: &HeatClient, args: StackArgs) -> HeatResult<()> {
    let stack = client
        .stacks()
        .get(&args.id)
        .await
        .map_err(|e| e.or_not_found("Stack", &args.id))?;

    print_dict(&stack, STACK_SHOW_FORMATTERS);
    Ok(())
}

/// List the user's stacks, oldest first.
pub async fn stack_list(client: &HeatClient) -> HeatResult<()> {
    let stacks = client.stacks().list().await?;
    print_list(&stacks, STACK_LIST_FIELDS, Some(3));
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
