//! Request payload assembly for stack create, update and validate.

use crate::commands::TemplateArgs;
use crate::environment::{FileBundle, ResolvedEnvironment, resolve_environment_file};
use crate::error::{HeatError, HeatResult};
use crate::fetch::Fetcher;
use crate::template::{Template, TemplateSource};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Everything gathered from the command line and the filesystem before a
/// stack request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct StackInputs {
    /// Parameter values from `-P`.
    pub parameters: BTreeMap<String, String>,

    /// The loaded template.
    pub template: Template,

    /// The resolved environment, if `-e` was given.
    pub environment: Option<ResolvedEnvironment>,
}

/// Body of a stack create, update or validate request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StackFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,

    /// Target of an update. Sent in the request path, not the body.
    #[serde(skip)]
    pub stack_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FileBundle>,

    pub parameters: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_mins: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_rollback: Option<bool>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl StackInputs {
    /// Gather parameters, template and environment.
    ///
    /// Template source and parameter syntax are checked before anything is
    /// read or fetched. Template objects go through `objects`; environment
    /// file references go through `references`.
    pub async fn gather(
        args: &TemplateArgs,
        objects: &dyn Fetcher,
        references: &dyn Fetcher,
    ) -> HeatResult<Self> {
        let source = TemplateSource::from_args(args)?;
        let parameters = parse_parameters(&args.parameters)?;

        let template = source.load(objects).await?;

        let environment = match &args.environment_file {
            Some(path) => Some(resolve_environment_file(path, references).await?),
            None => None,
        };

        Ok(Self {
            parameters,
            template,
            environment,
        })
    }
}

impl StackFields {
    /// Fields for `stack-create`.
    pub fn create(
        stack_name: impl Into<String>,
        timeout_mins: u32,
        enable_rollback: bool,
        inputs: StackInputs,
    ) -> Self {
        Self {
            stack_name: Some(stack_name.into()),
            timeout_mins: Some(timeout_mins),
            disable_rollback: Some(!enable_rollback),
            ..Self::from_inputs(inputs)
        }
    }

    /// Fields for `stack-update`.
    pub fn update(stack_id: impl Into<String>, inputs: StackInputs) -> Self {
        Self {
            stack_id: Some(stack_id.into()),
            ..Self::from_inputs(inputs)
        }
    }

    /// Fields for `template-validate`.
    pub fn validate(inputs: StackInputs) -> Self {
        Self::from_inputs(inputs)
    }

    fn from_inputs(inputs: StackInputs) -> Self {
        let mut fields = Self {
            parameters: inputs.parameters,
            ..Default::default()
        };

        match inputs.template {
            Template::Parsed(value) => fields.template = Some(value),
            Template::Raw(text) => fields.template = Some(Value::String(text)),
            Template::Url(url) => fields.template_url = Some(url),
        }

        if let Some(resolved) = inputs.environment {
            fields.environment = Some(resolved.environment);
            fields.files = Some(resolved.files);
        }

        fields
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse `-P` values into a parameter map.
///
/// Each value may hold several `KEY=VALUE` pairs separated by `;`. A pair is
/// split at its first `=`. Empty segments are skipped.
pub fn parse_parameters(values: &[String]) -> HeatResult<BTreeMap<String, String>> {
    let mut parameters = BTreeMap::new();

    for segment in values.iter().flat_map(|v| v.split(';')) {
        if segment.is_empty() {
            continue;
        }

        let Some((key, value)) = segment.split_once('=') else {
            return Err(HeatError::MalformedParameter(segment.to_string()));
        };
        parameters.insert(key.to_string(), value.to_string());
    }

    Ok(parameters)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::MemoryFetcher;
    use serde_json::json;
    use std::path::PathBuf;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn inputs(template: Template) -> StackInputs {
        StackInputs {
            parameters: BTreeMap::from([("flavor".to_string(), "m1.small".to_string())]),
            template,
            environment: None,
        }
    }

    #[test]
    fn test_parse_parameters() {
        let params = parse_parameters(&strings(&["a=1;b=2", "c=3"])).unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params["a"], "1");
        assert_eq!(params["b"], "2");
        assert_eq!(params["c"], "3");

        assert!(parse_parameters(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_parameters_value_with_equals() {
        let params = parse_parameters(&strings(&["user_data=a=b"])).unwrap();
        assert_eq!(params["user_data"], "a=b");
    }

    #[test]
    fn test_parse_parameters_later_wins() {
        let params = parse_parameters(&strings(&["a=1", "a=2"])).unwrap();
        assert_eq!(params["a"], "2");
    }

    #[test]
    fn test_parse_parameters_skips_empty_segments() {
        let params = parse_parameters(&strings(&["a=1;", ";b=2"])).unwrap();
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_parameters_malformed() {
        let err = parse_parameters(&strings(&["a=1;oops"])).unwrap_err();
        assert!(matches!(err, HeatError::MalformedParameter(ref s) if s == "oops"));
        assert_eq!(
            err.to_string(),
            "Malformed parameter(oops). Use the key=value format."
        );
    }

    #[test]
    fn test_create_fields() {
        let fields = StackFields::create("teststack", 60, false, inputs(Template::Raw("x".into())));

        assert_eq!(fields.stack_name.as_deref(), Some("teststack"));
        assert_eq!(fields.timeout_mins, Some(60));
        assert_eq!(fields.disable_rollback, Some(true));
        assert_eq!(fields.template, Some(json!("x")));
        assert_eq!(fields.template_url, None);
        assert_eq!(fields.files, None);

        let enabled = StackFields::create("teststack", 5, true, inputs(Template::Raw("x".into())));
        assert_eq!(enabled.disable_rollback, Some(false));
        assert_eq!(enabled.timeout_mins, Some(5));
    }

    #[test]
    fn test_create_payload() {
        let mut stack_inputs = inputs(Template::Url("http://x/t.yaml".into()));
        stack_inputs.environment = Some(ResolvedEnvironment {
            environment: json!({"resource_registry": {"My::Type": "file:///tmp/a.yaml"}}),
            files: FileBundle::from([("file:///tmp/a.yaml".to_string(), "a".to_string())]),
        });

        let fields = StackFields::create("teststack", 60, false, stack_inputs);
        let payload = serde_json::to_value(&fields).unwrap();

        assert_eq!(
            payload,
            json!({
                "stack_name": "teststack",
                "template_url": "http://x/t.yaml",
                "environment": {"resource_registry": {"My::Type": "file:///tmp/a.yaml"}},
                "files": {"file:///tmp/a.yaml": "a"},
                "parameters": {"flavor": "m1.small"},
                "timeout_mins": 60,
                "disable_rollback": true
            })
        );
    }

    #[test]
    fn test_update_payload_has_no_create_fields() {
        let fields = StackFields::update("teststack/1", inputs(Template::Parsed(json!({}))));
        assert_eq!(fields.stack_id.as_deref(), Some("teststack/1"));

        let payload = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            payload,
            json!({"template": {}, "parameters": {"flavor": "m1.small"}})
        );
    }

    #[tokio::test]
    async fn test_gather_checks_source_before_io() {
        let args = TemplateArgs {
            template_file: Some(PathBuf::from("/does/not/exist.yaml")),
            template_object: Some("http://swift/t".into()),
            environment_file: Some(PathBuf::from("/does/not/exist/env.yaml")),
            ..Default::default()
        };
        let objects = MemoryFetcher::new().with("http://swift/t", "{}");
        let references = MemoryFetcher::new();

        let result = StackInputs::gather(&args, &objects, &references).await;

        assert!(matches!(result, Err(HeatError::Config(_))));
        assert!(objects.requested().is_empty());
        assert!(references.requested().is_empty());
    }

    #[tokio::test]
    async fn test_gather_checks_parameters_before_io() {
        let args = TemplateArgs {
            template_object: Some("http://swift/t".into()),
            parameters: strings(&["broken"]),
            ..Default::default()
        };
        let objects = MemoryFetcher::new().with("http://swift/t", "{}");

        let result = StackInputs::gather(&args, &objects, &MemoryFetcher::new()).await;

        assert!(matches!(result, Err(HeatError::MalformedParameter(_))));
        assert!(objects.requested().is_empty());
    }

    #[tokio::test]
    async fn test_gather_with_environment() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("template.yaml");
        let env_path = dir.path().join("env.yaml");
        std::fs::write(&template_path, "heat_template_version: 2013-05-23\n").unwrap();
        std::fs::write(&env_path, "resource_registry:\n  My::Type: nested.yaml\n").unwrap();

        let nested = url::Url::from_directory_path(dir.path())
            .unwrap()
            .join("nested.yaml")
            .unwrap()
            .to_string();

        let args = TemplateArgs {
            template_file: Some(template_path),
            environment_file: Some(env_path),
            parameters: strings(&["a=1"]),
            ..Default::default()
        };
        let references = MemoryFetcher::new().with(&nested, "nested");

        let inputs = StackInputs::gather(&args, &MemoryFetcher::new(), &references)
            .await
            .unwrap();

        assert_eq!(
            inputs.template,
            Template::Raw("heat_template_version: 2013-05-23\n".into())
        );
        let environment = inputs.environment.unwrap();
        assert_eq!(
            environment.environment["resource_registry"]["My::Type"],
            json!(nested)
        );
        assert_eq!(environment.files.get(&nested).map(String::as_str), Some("nested"));
        assert_eq!(inputs.parameters["a"], "1");
    }
}
