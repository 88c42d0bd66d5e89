//! Resource command handlers.

use crate::client::{HeatClient, Record};
use crate::commands::{ResourceArgs, StackArgs};
use crate::error::HeatResult;
use crate::output::{Formatter, OutputFormat, format_output, json_pretty, print_dict, print_list};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const RESOURCE_SHOW_FORMATTERS: &[(&str, Formatter)] = &[
    ("links", Formatter::Links),
    ("required_by", Formatter::NewlineList),
];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// List the resources of a stack.
pub async fn resource_list(client: &HeatClient, args: StackArgs) -> HeatResult<()> {
    let resources = client
        .resources()
        .list(&args.id)
        .await
        .map_err(|e| e.or_not_found("Stack", &args.id))?;

    let mut fields = vec!["resource_type", "resource_status", "updated_time"];
    fields.insert(0, name_field(&resources));

    print_list(&resources, &fields, Some(3));
    Ok(())
}

/// Show the details of a resource.
pub async fn resource_show(client: &HeatClient, args: ResourceArgs) -> HeatResult<()> {
    let resource = client
        .resources()
        .get(&args.id, &args.resource)
        .await
        .map_err(|e| {
            e.or_not_found("Stack or resource", &format!("{} {}", args.id, args.resource))
        })?;

    print_dict(&resource, RESOURCE_SHOW_FORMATTERS);
    Ok(())
}

/// Print a template generated from a resource type.
pub async fn resource_template(
    client: &HeatClient,
    resource: &str,
    format: Option<OutputFormat>,
) -> HeatResult<()> {
    let template = client
        .resources()
        .generate_template(resource)
        .await
        .map_err(|e| e.or_not_found("Resource", resource))?;

    println!("{}", format_output(&template, format.unwrap_or_default())?);
    Ok(())
}

/// Print the metadata of a resource.
pub async fn resource_metadata(client: &HeatClient, args: ResourceArgs) -> HeatResult<()> {
    let metadata = client
        .resources()
        .metadata(&args.id, &args.resource)
        .await
        .map_err(|e| {
            e.or_not_found("Stack or resource", &format!("{} {}", args.id, args.resource))
        })?;

    println!("{}", json_pretty(&metadata));
    Ok(())
}

/// Column naming a resource. Older servers only report `logical_resource_id`.
pub(crate) fn name_field(records: &[Record]) -> &'static str {
    match records.first() {
        Some(first) if !first.contains_key("resource_name") => "logical_resource_id",
        _ => "resource_name",
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{client_for, serve_once};
    use serde_json::json;

    #[test]
    fn test_name_field() {
        let current = json!({"resource_name": "server"});
        let legacy = json!({"logical_resource_id": "server"});

        assert_eq!(
            name_field(&[current.as_object().unwrap().clone()]),
            "resource_name"
        );
        assert_eq!(
            name_field(&[legacy.as_object().unwrap().clone()]),
            "logical_resource_id"
        );
        assert_eq!(name_field(&[]), "resource_name");
    }

    #[tokio::test]
    async fn test_resource_show_not_found() {
        let body = r#"{"error": {"message": "The Stack (web) could not be found."}}"#;
        let (endpoint, server) = serve_once(404, body).await;

        let args = ResourceArgs {
            id: "web".into(),
            resource: "server".into(),
        };
        let err = resource_show(&client_for(&endpoint), args).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.to_string(), "Stack or resource not found: web server");
    }
}
