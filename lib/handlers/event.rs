//! Event command handlers.

use super::resource::name_field;
use crate::client::HeatClient;
use crate::commands::EventArgs;
use crate::error::HeatResult;
use crate::output::{Formatter, print_dict, print_list};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const EVENT_SHOW_FORMATTERS: &[(&str, Formatter)] = &[
    ("links", Formatter::Links),
    ("resource_properties", Formatter::Json),
];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// List the events of a stack, optionally for a single resource.
pub async fn event_list(client: &HeatClient, id: &str, resource: Option<&str>) -> HeatResult<()> {
    let events = client
        .events()
        .list(id, resource)
        .await
        .map_err(|e| e.or_not_found("Stack", id))?;

    let mut fields = vec!["id", "resource_status_reason", "resource_status", "event_time"];
    fields.insert(0, name_field(&events));

    print_list(&events, &fields, None);
    Ok(())
}

/// Show the details of an event.
pub async fn event_show(client: &HeatClient, args: EventArgs) -> HeatResult<()> {
    // A 404 may concern the stack, the resource or the event; the server's
    // message says which, so it is passed through as is.
    let event = client
        .events()
        .get(&args.id, &args.resource, &args.event)
        .await?;

    print_dict(&event, EVENT_SHOW_FORMATTERS);
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{client_for, serve_once};

    #[tokio::test]
    async fn test_event_show_keeps_server_message() {
        let body = r#"{"error": {"message": "The Stack (web) could not be found."}}"#;
        let (endpoint, server) = serve_once(404, body).await;

        let args = EventArgs {
            id: "web".into(),
            resource: "server".into(),
            event: "42".into(),
        };
        let err = event_show(&client_for(&endpoint), args).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.to_string(), "The Stack (web) could not be found.");
    }
}
