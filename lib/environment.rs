//! Environment descriptor resolution.
//!
//! An environment carries parameter defaults and a `resource_registry` mapping
//! resource type names to provider templates. Provider references are relative
//! to the descriptor's directory (or to a registry `base_url`), but the API
//! server cannot see the local filesystem, so every reference is fetched into
//! a file bundle and rewritten in place to the absolute URL it was fetched from.
//!
//! Resolution covers exactly two levels: the top-level registry, then each
//! override under its `resources` key. Deeper mappings are left untouched.

use crate::constants::{BASE_URL_KEY, BUILTIN_TYPE_MARKER, RESOURCE_REGISTRY_KEY, RESOURCES_KEY};
use crate::error::{HeatError, HeatResult};
use crate::fetch::Fetcher;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use url::Url;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Fetched provider templates keyed by the absolute URL they came from.
pub type FileBundle = BTreeMap<String, String>;

/// An environment whose registry references have all been fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEnvironment {
    /// The environment, with fetched registry entries rewritten to absolute URLs.
    pub environment: Value,

    /// Content of every fetched registry entry.
    pub files: FileBundle,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Read, parse and resolve the environment descriptor at `path`.
pub async fn resolve_environment_file(
    path: &Path,
    fetcher: &dyn Fetcher,
) -> HeatResult<ResolvedEnvironment> {
    let base_url = environment_base_url(path)?;

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| HeatError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

    let environment = parse_environment(&raw)?;
    tracing::debug!(path = %path.display(), base_url = %base_url, "resolving environment");

    resolve_environment(environment, &base_url, fetcher).await
}

/// Directory of the descriptor as a `file:` URL, with a trailing separator.
pub fn environment_base_url(path: &Path) -> HeatResult<Url> {
    let absolute = std::path::absolute(path)?;
    let dir = absolute.parent().unwrap_or(&absolute);

    Url::from_directory_path(dir).map_err(|_| {
        HeatError::InvalidEnvironment(format!(
            "cannot build a file URL for {}",
            dir.display()
        ))
    })
}

/// Parse descriptor text (YAML or JSON) into a mapping.
///
/// An empty document is treated as an empty mapping.
pub fn parse_environment(raw: &str) -> HeatResult<Value> {
    match serde_yaml::from_str::<Value>(raw)? {
        Value::Null => Ok(Value::Object(Map::new())),
        value @ Value::Object(_) => Ok(value),
        _ => Err(HeatError::InvalidEnvironment(
            "the environment must be a mapping".into(),
        )),
    }
}

/// Fetch every registry reference of `environment`, resolving relative ones
/// against `base_url` unless the registry overrides it.
pub async fn resolve_environment(
    mut environment: Value,
    base_url: &Url,
    fetcher: &dyn Fetcher,
) -> HeatResult<ResolvedEnvironment> {
    let mut files = FileBundle::new();

    let Some(env) = environment.as_object_mut() else {
        return Err(HeatError::InvalidEnvironment(
            "the environment must be a mapping".into(),
        ));
    };

    match env.get_mut(RESOURCE_REGISTRY_KEY) {
        None | Some(Value::Null) => {}
        Some(Value::Object(registry)) => {
            let base_url = registry
                .get(BASE_URL_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| base_url.to_string());

            // Level one: the registry itself.
            resolve_registry(registry, &base_url, &mut files, fetcher).await?;

            // Level two: per-resource overrides.
            if let Some(Value::Object(resources)) = registry.get_mut(RESOURCES_KEY) {
                for (name, overrides) in resources.iter_mut() {
                    let Value::Object(overrides) = overrides else {
                        tracing::debug!(resource = %name, "skipping non-mapping override");
                        continue;
                    };

                    let resource_base_url = overrides
                        .get(BASE_URL_KEY)
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| base_url.clone());

                    resolve_registry(overrides, &resource_base_url, &mut files, fetcher).await?;
                }
            }
        }
        Some(_) => {
            return Err(HeatError::InvalidEnvironment(format!(
                "'{}' must be a mapping",
                RESOURCE_REGISTRY_KEY
            )));
        }
    }

    Ok(ResolvedEnvironment { environment, files })
}

/// Whether a registry entry must be left alone rather than fetched.
///
/// True for the `base_url` key itself, for nested mappings, for non-string
/// values, and for built-in provider names such as `OS::Nova::Server`.
pub fn is_ignored(key: &str, value: &Value) -> bool {
    if key == BASE_URL_KEY {
        return true;
    }

    match value {
        Value::String(s) => s.contains(BUILTIN_TYPE_MARKER),
        _ => true,
    }
}

/// Join a registry value onto a base URL.
///
/// A base without a trailing `/` gets one appended before concatenation.
/// Values that are already absolute URLs are returned as they are, so joining
/// a previously resolved value yields the same URL.
pub fn join_url(base_url: &str, value: &str) -> HeatResult<String> {
    if let Ok(url) = Url::parse(value)
        && !url.cannot_be_a_base()
    {
        return Ok(url.to_string());
    }

    let joined = if base_url.is_empty() || base_url.ends_with('/') {
        format!("{}{}", base_url, value)
    } else {
        format!("{}/{}", base_url, value)
    };

    let url = Url::parse(&joined).map_err(|e| HeatError::EnvironmentFetch {
        url: joined.clone(),
        reason: e.to_string(),
    })?;

    Ok(url.to_string())
}

/// Fetch the non-ignored entries of one registry level and rewrite them in place.
async fn resolve_registry(
    registry: &mut Map<String, Value>,
    base_url: &str,
    files: &mut FileBundle,
    fetcher: &dyn Fetcher,
) -> HeatResult<()> {
    let references: Vec<(String, String)> = registry
        .iter()
        .filter(|(key, value)| !is_ignored(key, value))
        .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
        .collect();

    for (key, value) in references {
        let url = join_url(base_url, &value)?;
        tracing::debug!(resource_type = %key, url = %url, "fetching registry entry");

        let content = fetcher
            .fetch(&url)
            .await
            .map_err(|e| HeatError::EnvironmentFetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        files.insert(url.clone(), content);
        registry.insert(key, Value::String(url));
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
