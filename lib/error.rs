//! Error types for heat-cli.

use std::path::PathBuf;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for heat-cli operations.
pub type HeatResult<T> = Result<T, HeatError>;

/// Error type for heat-cli operations.
#[derive(Debug, Error)]
pub enum HeatError {
    /// Conflicting or missing options, detected before any I/O.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A `-P` segment without a `=`.
    #[error("Malformed parameter({0}). Use the key=value format.")]
    MalformedParameter(String),

    /// A local template or environment file could not be read.
    #[error("Could not read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template object could not be retrieved.
    #[error("Could not fetch template from {reference}: {reason}")]
    TemplateFetch { reference: String, reason: String },

    /// A file referenced by the environment could not be retrieved.
    #[error("Could not fetch {url} from the environment: {reason}")]
    EnvironmentFetch { url: String, reason: String },

    /// The environment descriptor is not a mapping.
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    /// The targeted stack, resource, resource type or event does not exist.
    #[error("{kind} not found: {reference}")]
    NotFound { kind: String, reference: String },

    /// The API answered 404. Carries the server's message verbatim.
    #[error("{0}")]
    HttpNotFound(String),

    /// Any other API failure.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Transport error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl HeatError {
    /// Build a command-level not-found error.
    pub fn not_found(kind: impl Into<String>, reference: impl Into<String>) -> Self {
        HeatError::NotFound {
            kind: kind.into(),
            reference: reference.into(),
        }
    }

    /// Whether the API reported that the target does not exist.
    pub fn is_http_not_found(&self) -> bool {
        matches!(self, HeatError::HttpNotFound(_))
    }

    /// Replace an API-level 404 by a command-level not-found naming the entity.
    /// Other errors are returned unchanged.
    pub fn or_not_found(self, kind: &str, reference: &str) -> Self {
        if self.is_http_not_found() {
            HeatError::not_found(kind, reference)
        } else {
            self
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_found() {
        let err = HeatError::HttpNotFound("The Stack (x) could not be found.".into())
            .or_not_found("Stack", "x");
        assert_eq!(err.to_string(), "Stack not found: x");

        let err = HeatError::Http {
            status: 500,
            message: "boom".into(),
        }
        .or_not_found("Stack", "x");
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_http_not_found_is_verbatim() {
        let err = HeatError::HttpNotFound("No event 42 in resource server".into());
        assert_eq!(err.to_string(), "No event 42 in resource server");
    }
}
