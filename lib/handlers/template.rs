//! Template command handlers.

use crate::client::HeatClient;
use crate::commands::{StackArgs, TemplateArgs};
use crate::error::HeatResult;
use crate::fetch::UrlFetcher;
use crate::output::{format_template, json_pretty};
use crate::request::{StackFields, StackInputs};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Print the template of a stack.
pub async fn template_show(client: &HeatClient, args: StackArgs) -> HeatResult<()> {
    let template = client
        .stacks()
        .template(&args.id)
        .await
        .map_err(|e| e.or_not_found("Stack", &args.id))?;

    println!("{}", format_template(&template)?);
    Ok(())
}

/// Validate a template with parameters and print the result.
pub async fn template_validate(client: &HeatClient, args: TemplateArgs) -> HeatResult<()> {
    let references = UrlFetcher::new(client.http().clone());
    let inputs = StackInputs::gather(&args, client, &references).await?;

    let validation = client.stacks().validate(&StackFields::validate(inputs)).await?;

    println!("{}", json_pretty(&validation));
    Ok(())
}
