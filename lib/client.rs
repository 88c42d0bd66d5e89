//! Client for the Heat v1 API.
//!
//! [`HeatClient`] owns transport and authentication and is built once per
//! invocation. Each resource family is reached through a borrowing manager:
//! `client.stacks().list()`, `client.events().get(..)` and so on.

mod actions;
mod events;
mod resource_types;
mod resources;
mod stacks;

use crate::config::ClientConfig;
use crate::constants::{AUTH_TOKEN_HEADER, user_agent};
use crate::error::{HeatError, HeatResult};
use crate::fetch::Fetcher;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use actions::ActionManager;
pub use events::EventManager;
pub use resource_types::ResourceTypeManager;
pub use resources::ResourceManager;
pub use stacks::StackManager;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A single record returned by the API.
pub type Record = Map<String, Value>;

/// Client for the Heat v1 API.
#[derive(Debug, Clone)]
pub struct HeatClient {
    /// Endpoint URL, without a trailing slash.
    endpoint: String,

    /// Optional authentication token.
    token: Option<String>,

    /// HTTP client.
    http: Client,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl HeatClient {
    /// Create a client from the resolved configuration.
    pub fn new(config: &ClientConfig) -> HeatResult<Self> {
        let mut builder = Client::builder()
            .user_agent(user_agent())
            .danger_accept_invalid_certs(config.insecure);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
            token: config.token.clone(),
            http,
        })
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Stack operations.
    pub fn stacks(&self) -> StackManager<'_> {
        StackManager::new(self)
    }

    /// Resource operations.
    pub fn resources(&self) -> ResourceManager<'_> {
        ResourceManager::new(self)
    }

    /// Resource type operations.
    pub fn resource_types(&self) -> ResourceTypeManager<'_> {
        ResourceTypeManager::new(self)
    }

    /// Event operations.
    pub fn events(&self) -> EventManager<'_> {
        EventManager::new(self)
    }

    /// Stack action operations.
    pub fn actions(&self) -> ActionManager<'_> {
        ActionManager::new(self)
    }

    /// Resolve a location against the endpoint. Absolute URLs pass through.
    pub fn url(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            location.to_string()
        } else {
            format!("{}/{}", self.endpoint, location.trim_start_matches('/'))
        }
    }

    /// Send a JSON request and return the decoded response body.
    ///
    /// An empty response body decodes to `Value::Null`.
    pub async fn json_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> HeatResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .request(method, path)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let text = check(request.send().await?).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn get(&self, path: &str) -> HeatResult<Value> {
        self.json_request::<()>(Method::GET, path, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> HeatResult<Value> {
        self.json_request::<()>(Method::DELETE, path, None).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> HeatResult<Value> {
        self.json_request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> HeatResult<Value> {
        self.json_request(Method::PUT, path, Some(body)).await
    }

    /// Send a request and return the raw response body.
    pub async fn raw_request(&self, method: Method, location: &str) -> HeatResult<String> {
        let response = self.request(method, location).send().await?;
        Ok(check(response).await?.text().await?)
    }

    fn request(&self, method: Method, location: &str) -> RequestBuilder {
        let url = self.url(location);
        tracing::debug!(%method, %url, "request");

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }
        request
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

/// Authenticated GET, used for template objects.
#[async_trait]
impl Fetcher for HeatClient {
    async fn fetch(&self, location: &str) -> HeatResult<String> {
        self.raw_request(Method::GET, location).await
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Turn non-success responses into errors carrying the server's message.
async fn check(response: Response) -> HeatResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    tracing::debug!(status = status.as_u16(), %message, "request failed");

    if status == StatusCode::NOT_FOUND {
        Err(HeatError::HttpNotFound(message))
    } else {
        Err(HeatError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extract a human-readable message from an error response body.
///
/// Tries `error.message`, then `explanation`, then `title`, then the raw body.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(doc) = serde_json::from_str::<Value>(body) {
        let candidates = [
            doc.pointer("/error/message"),
            doc.get("explanation"),
            doc.get("title"),
        ];
        if let Some(message) = candidates
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .find(|m| !m.trim().is_empty())
        {
            return message.trim().to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        body.to_string()
    }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Take the list stored under `key` in a response.
pub(crate) fn take_list(mut value: Value, key: &str) -> HeatResult<Vec<Record>> {
    match value.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => record,
                other => Record::from_iter([(key.trim_end_matches('s').to_string(), other)]),
            })
            .collect()),
        _ => Err(unexpected_response(key)),
    }
}

/// Take the record stored under `key` in a response.
pub(crate) fn take_record(mut value: Value, key: &str) -> HeatResult<Record> {
    match value.get_mut(key).map(Value::take) {
        Some(Value::Object(record)) => Ok(record),
        _ => Err(unexpected_response(key)),
    }
}

fn unexpected_response(key: &str) -> HeatError {
    HeatError::Generic(format!("Unexpected response: missing '{}'", key))
}

//--------------------------------------------------------------------------------------------------
// Test Support
//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::testing::{client_for, serve_once};
    use super::*;
    use serde_json::json;

    pub(super) fn client() -> HeatClient {
        client_for("http://heat:8004/v1/tenant")
    }

    #[tokio::test]
    async fn test_not_found_keeps_server_message() {
        let body = r#"{"error": {"message": "The Stack (web) could not be found."}}"#;
        let (endpoint, server) = serve_once(404, body).await;

        let err = client_for(&endpoint).get("/stacks/web").await.unwrap_err();
        server.await.unwrap();

        assert!(err.is_http_not_found());
        assert_eq!(err.to_string(), "The Stack (web) could not be found.");
    }

    #[tokio::test]
    async fn test_other_failures_carry_status() {
        let (endpoint, server) = serve_once(500, r#"{"explanation": "boom"}"#).await;

        let err = client_for(&endpoint).get("/stacks").await.unwrap_err();
        server.await.unwrap();

        match err {
            HeatError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_is_authenticated_and_relative_to_endpoint() {
        let (endpoint, server) = serve_once(200, r#"{"Resources": {}}"#).await;

        let body = client_for(&endpoint)
            .fetch("container/web.json")
            .await
            .unwrap();
        let head = server.await.unwrap();

        assert_eq!(body, r#"{"Resources": {}}"#);
        assert!(head.starts_with("GET /v1/tenant/container/web.json HTTP/1.1\r\n"));
        assert!(head.to_lowercase().contains("\r\nx-auth-token: secret\r\n"));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let (endpoint, server) = serve_once(204, "").await;

        let value = client_for(&endpoint).delete("/stacks/web/1").await.unwrap();
        server.await.unwrap();

        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_url() {
        let client = client();
        assert_eq!(client.endpoint(), "http://heat:8004/v1/tenant");
        assert_eq!(client.url("/stacks"), "http://heat:8004/v1/tenant/stacks");
        assert_eq!(client.url("stacks"), "http://heat:8004/v1/tenant/stacks");
        assert_eq!(
            client.url("http://swift:8080/v1/AUTH_t/c/t.json"),
            "http://swift:8080/v1/AUTH_t/c/t.json"
        );
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"explanation": "The resource could not be found.", "code": 404,
            "error": {"message": "The Stack (bad) could not be found.", "type": "StackNotFound"},
            "title": "Not Found"}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "The Stack (bad) could not be found."
        );

        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"explanation": "Bad input", "title": "Bad Request"}"#
            ),
            "Bad input"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "boom\n"),
            "boom"
        );
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_segment() {
        assert_eq!(segment("teststack"), "teststack");
        assert_eq!(segment("OS::Nova::Server"), "OS%3A%3ANova%3A%3AServer");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn test_take_list() {
        let records = take_list(json!({"stacks": [{"id": "1"}, {"id": "2"}]}), "stacks").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["id"], json!("2"));

        let types = take_list(json!({"resource_types": ["OS::Nova::Server"]}), "resource_types")
            .unwrap();
        assert_eq!(types[0]["resource_type"], json!("OS::Nova::Server"));

        assert!(take_list(json!({"other": []}), "stacks").is_err());
    }

    #[test]
    fn test_take_record() {
        let record = take_record(json!({"stack": {"id": "1"}}), "stack").unwrap();
        assert_eq!(record["id"], json!("1"));
        assert!(take_record(json!({"stack": []}), "stack").is_err());
        assert!(take_record(Value::Null, "stack").is_err());
    }
}
