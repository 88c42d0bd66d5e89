//! Stack template loading.
//!
//! A template comes from exactly one of a local file, a URL handed to the
//! server untouched, or an object fetched through the authenticated client.

use crate::commands::TemplateArgs;
use crate::error::{HeatError, HeatResult};
use crate::fetch::Fetcher;
use serde_json::Value;
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Where the template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A local file.
    File(PathBuf),

    /// A URL the server retrieves itself.
    Url(String),

    /// An object retrieved through the API client, e.g. from an object store.
    Object(String),
}

/// A loaded template, ready to be placed into a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Parsed JSON content.
    Parsed(Value),

    /// Raw text (usually YAML), interpreted by the server.
    Raw(String),

    /// Sent to the server as `template_url`.
    Url(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl TemplateSource {
    /// Pick the single template source from the command line options.
    ///
    /// Fails when none or more than one of the three options is given.
    pub fn from_args(args: &TemplateArgs) -> HeatResult<Self> {
        let mut sources: Vec<TemplateSource> = [
            args.template_file.clone().map(TemplateSource::File),
            args.template_url.clone().map(TemplateSource::Url),
            args.template_object.clone().map(TemplateSource::Object),
        ]
        .into_iter()
        .flatten()
        .collect();

        if sources.len() != 1 {
            return Err(HeatError::Config(
                "Need to specify exactly one of --template-file, --template-url or --template-object"
                    .into(),
            ));
        }

        Ok(sources.remove(0))
    }

    /// Load the template.
    ///
    /// Only object sources go through `fetcher`.
    pub async fn load(&self, fetcher: &dyn Fetcher) -> HeatResult<Template> {
        match self {
            TemplateSource::File(path) => load_template_file(path).await,
            TemplateSource::Url(url) => Ok(Template::Url(url.clone())),
            TemplateSource::Object(reference) => load_template_object(reference, fetcher).await,
        }
    }
}

impl Template {
    /// Interpret template text: content starting with `{` is JSON, anything
    /// else is kept as raw text.
    pub fn from_text(text: String) -> HeatResult<Self> {
        if text.starts_with('{') {
            Ok(Template::Parsed(serde_json::from_str(&text)?))
        } else {
            Ok(Template::Raw(text))
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

async fn load_template_file(path: &Path) -> HeatResult<Template> {
    tracing::debug!(path = %path.display(), "loading template file");

    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| HeatError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

    Template::from_text(text)
}

async fn load_template_object(reference: &str, fetcher: &dyn Fetcher) -> HeatResult<Template> {
    tracing::debug!(object = %reference, "fetching template object");

    let body = fetcher
        .fetch(reference)
        .await
        .map_err(|e| HeatError::TemplateFetch {
            reference: reference.to_string(),
            reason: e.to_string(),
        })?;

    if body.is_empty() {
        return Err(HeatError::TemplateFetch {
            reference: reference.to_string(),
            reason: "empty response".into(),
        });
    }

    Ok(Template::Parsed(serde_json::from_str(&body)?))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{client_for, serve_once};
    use crate::fetch::testing::MemoryFetcher;
    use serde_json::json;

    fn args(file: Option<&str>, url: Option<&str>, object: Option<&str>) -> TemplateArgs {
        TemplateArgs {
            template_file: file.map(PathBuf::from),
            template_url: url.map(str::to_string),
            template_object: object.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_exactly_one_source() {
        assert_eq!(
            TemplateSource::from_args(&args(Some("t.yaml"), None, None)).unwrap(),
            TemplateSource::File(PathBuf::from("t.yaml"))
        );
        assert_eq!(
            TemplateSource::from_args(&args(None, Some("http://x/t.yaml"), None)).unwrap(),
            TemplateSource::Url("http://x/t.yaml".into())
        );
        assert_eq!(
            TemplateSource::from_args(&args(None, None, Some("http://swift/t"))).unwrap(),
            TemplateSource::Object("http://swift/t".into())
        );
    }

    #[test]
    fn test_no_source_is_config_error() {
        let result = TemplateSource::from_args(&args(None, None, None));
        assert!(matches!(result, Err(HeatError::Config(_))));
    }

    #[test]
    fn test_multiple_sources_is_config_error() {
        for candidate in [
            args(Some("t.yaml"), Some("http://x/t.yaml"), None),
            args(Some("t.yaml"), None, Some("http://swift/t")),
            args(None, Some("http://x/t.yaml"), Some("http://swift/t")),
            args(Some("t.yaml"), Some("http://x/t.yaml"), Some("http://swift/t")),
        ] {
            let result = TemplateSource::from_args(&candidate);
            assert!(matches!(result, Err(HeatError::Config(_))));
        }
    }

    #[test]
    fn test_from_text() {
        assert_eq!(
            Template::from_text("{\"Resources\": {}}".into()).unwrap(),
            Template::Parsed(json!({"Resources": {}}))
        );
        assert_eq!(
            Template::from_text("heat_template_version: 2013-05-23\n".into()).unwrap(),
            Template::Raw("heat_template_version: 2013-05-23\n".into())
        );
        assert!(matches!(
            Template::from_text("{not json".into()),
            Err(HeatError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.json");
        std::fs::write(&path, "{\"AWSTemplateFormatVersion\": \"2010-09-09\"}").unwrap();

        let fetcher = MemoryFetcher::new();
        let template = TemplateSource::File(path).load(&fetcher).await.unwrap();

        assert_eq!(
            template,
            Template::Parsed(json!({"AWSTemplateFormatVersion": "2010-09-09"}))
        );
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TemplateSource::File(dir.path().join("missing.yaml"))
            .load(&MemoryFetcher::new())
            .await;
        assert!(matches!(result, Err(HeatError::ReadFile { .. })));
    }

    #[tokio::test]
    async fn test_load_url_is_not_fetched() {
        let fetcher = MemoryFetcher::new();
        let template = TemplateSource::Url("http://x/t.yaml".into())
            .load(&fetcher)
            .await
            .unwrap();

        assert_eq!(template, Template::Url("http://x/t.yaml".into()));
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_load_object() {
        let fetcher = MemoryFetcher::new().with("http://swift/t", "{\"Resources\": {}}");
        let template = TemplateSource::Object("http://swift/t".into())
            .load(&fetcher)
            .await
            .unwrap();

        assert_eq!(template, Template::Parsed(json!({"Resources": {}})));
        assert_eq!(fetcher.requested(), vec!["http://swift/t"]);
    }

    #[tokio::test]
    async fn test_load_empty_object() {
        let fetcher = MemoryFetcher::new().with("http://swift/t", "");
        let err = TemplateSource::Object("http://swift/t".into())
            .load(&fetcher)
            .await
            .unwrap_err();

        assert!(
            matches!(err, HeatError::TemplateFetch { ref reference, .. } if reference == "http://swift/t")
        );
        assert_eq!(
            err.to_string(),
            "Could not fetch template from http://swift/t: empty response"
        );
    }

    #[tokio::test]
    async fn test_load_unreachable_object() {
        let result = TemplateSource::Object("http://swift/missing".into())
            .load(&MemoryFetcher::new())
            .await;
        assert!(matches!(result, Err(HeatError::TemplateFetch { .. })));
    }

    #[tokio::test]
    async fn test_load_object_keeps_fetch_cause() {
        let (endpoint, server) = serve_once(401, r#"{"title": "Unauthorized"}"#).await;
        let client = client_for(&endpoint);

        let err = TemplateSource::Object("container/web.json".into())
            .load(&client)
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            HeatError::TemplateFetch { reference, reason } => {
                assert_eq!(reference, "container/web.json");
                assert_eq!(reason, "HTTP 401: Unauthorized");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
