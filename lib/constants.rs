//! Constants for heat-cli.
//!
//! Environment variable names, defaults and API constants.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Environment variable for the orchestration endpoint.
pub const HEAT_URL_ENV: &str = "HEAT_URL";

/// Environment variable for the auth token.
pub const OS_AUTH_TOKEN_ENV: &str = "OS_AUTH_TOKEN";

/// Environment variable for an optional client-side request timeout, in seconds.
pub const HEAT_TIMEOUT_ENV: &str = "HEAT_TIMEOUT";

/// Default server-side stack creation timeout, in minutes.
pub const DEFAULT_CREATE_TIMEOUT_MINS: u32 = 60;

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Key of the resource registry inside an environment.
pub const RESOURCE_REGISTRY_KEY: &str = "resource_registry";

/// Key overriding the join root inside a registry.
pub const BASE_URL_KEY: &str = "base_url";

/// Key holding per-resource registry overrides.
pub const RESOURCES_KEY: &str = "resources";

/// Marker of built-in provider types (`OS::Nova::Server`), which are never fetched.
pub const BUILTIN_TYPE_MARKER: &str = "::";

/// Template key identifying HOT templates, which are shown as YAML.
pub const HOT_VERSION_KEY: &str = "heat_template_version";

/// Column width used when wrapping long text values.
pub const TEXT_WRAP_WIDTH: usize = 70;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// User agent sent with every API request.
pub fn user_agent() -> String {
    format!("heat-cli/{}", env!("CARGO_PKG_VERSION"))
}
