//! Retrieval of file references.
//!
//! Environment resolution and template object loading both pull raw documents
//! from somewhere. The [`Fetcher`] trait is the seam between them and the
//! transport, so resolution can be exercised without a network.

use crate::constants::user_agent;
use crate::error::{HeatError, HeatResult};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Fetches the raw content behind a reference.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Return the body found at `location`.
    async fn fetch(&self, location: &str) -> HeatResult<String>;
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Unauthenticated fetcher for `file:`, `http:` and `https:` URLs.
#[derive(Debug, Clone)]
pub struct UrlFetcher {
    http: Client,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl UrlFetcher {
    /// Create a fetcher that reuses the given HTTP client.
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl Default for UrlFetcher {
    fn default() -> Self {
        let http = Client::builder()
            .user_agent(user_agent())
            .build()
            .unwrap_or_default();
        Self::new(http)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

#[async_trait]
impl Fetcher for UrlFetcher {
    async fn fetch(&self, location: &str) -> HeatResult<String> {
        let url = Url::parse(location)?;
        tracing::debug!(url = %url, "fetching");

        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| HeatError::Generic(format!("Not a local path: {}", url)))?;
                Ok(tokio::fs::read_to_string(&path).await?)
            }
            "http" | "https" => {
                let response = self.http.get(url).send().await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(HeatError::Http {
                        status: status.as_u16(),
                        message: status.canonical_reason().unwrap_or("").to_string(),
                    });
                }

                Ok(response.text().await?)
            }
            scheme => Err(HeatError::Generic(format!(
                "Unsupported URL scheme '{}'",
                scheme
            ))),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Test Support
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory fetcher that records every requested location.
    #[derive(Debug, Default)]
    pub struct MemoryFetcher {
        documents: BTreeMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, location: &str, body: &str) -> Self {
            self.documents.insert(location.to_string(), body.to_string());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for MemoryFetcher {
        async fn fetch(&self, location: &str) -> HeatResult<String> {
            self.requested.lock().unwrap().push(location.to_string());
            self.documents
                .get(location)
                .cloned()
                .ok_or_else(|| HeatError::Generic(format!("no such document: {}", location)))
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{client_for, serve_once};

    #[tokio::test]
    async fn test_fetch_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.yaml");
        std::fs::write(&path, "resources: {}\n").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let body = UrlFetcher::default().fetch(url.as_str()).await.unwrap();
        assert_eq!(body, "resources: {}\n");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.yaml")).unwrap();

        let result = UrlFetcher::default().fetch(url.as_str()).await;
        assert!(matches!(result, Err(HeatError::Io(_))));
    }

    #[tokio::test]
    async fn test_fetch_rejects_unknown_scheme() {
        let result = UrlFetcher::default().fetch("ftp://example.com/a.yaml").await;
        assert!(matches!(result, Err(HeatError::Generic(_))));
    }

    #[tokio::test]
    async fn test_fetch_rejects_relative_reference() {
        let result = UrlFetcher::default().fetch("nested.yaml").await;
        assert!(matches!(result, Err(HeatError::Url(_))));
    }

    #[tokio::test]
    async fn test_fetch_http_reuses_client_identity() {
        let (endpoint, server) = serve_once(200, "resources: {}\n").await;
        let client = client_for(&endpoint);

        let body = UrlFetcher::new(client.http().clone())
            .fetch(&format!("{}/env/nested.yaml", endpoint))
            .await
            .unwrap();
        let head = server.await.unwrap().to_lowercase();

        assert_eq!(body, "resources: {}\n");
        let agents: Vec<&str> = head
            .lines()
            .filter(|line| line.starts_with("user-agent:"))
            .collect();
        assert_eq!(agents, vec![format!("user-agent: {}", user_agent()).as_str()]);
        assert!(!head.contains("x-auth-token"));
    }
}
