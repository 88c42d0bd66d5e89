//! Client configuration.
//!
//! Flags take precedence over environment variables, which take precedence
//! over defaults.

use crate::commands::GlobalArgs;
use crate::constants::{HEAT_TIMEOUT_ENV, HEAT_URL_ENV, OS_AUTH_TOKEN_ENV};
use crate::error::{HeatError, HeatResult};
use std::time::Duration;
use url::Url;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Connection settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API endpoint, without a trailing slash.
    pub endpoint: Url,

    /// Token sent as `X-Auth-Token`.
    pub token: Option<String>,

    /// Client-side request timeout. `None` waits as long as the server takes.
    pub timeout: Option<Duration>,

    /// Accept invalid TLS certificates.
    pub insecure: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ClientConfig {
    /// Resolve the configuration from flags and the process environment.
    pub fn from_args(args: &GlobalArgs) -> HeatResult<Self> {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    /// Resolve the configuration from flags and an environment lookup.
    pub fn resolve(args: &GlobalArgs, env: impl Fn(&str) -> Option<String>) -> HeatResult<Self> {
        let endpoint = args
            .heat_url
            .clone()
            .or_else(|| env(HEAT_URL_ENV))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                HeatError::Config(format!(
                    "You must provide an endpoint via --heat-url or {}",
                    HEAT_URL_ENV
                ))
            })?;

        let endpoint = Url::parse(endpoint.trim_end_matches('/'))
            .map_err(|e| HeatError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let token = args
            .os_auth_token
            .clone()
            .or_else(|| env(OS_AUTH_TOKEN_ENV))
            .filter(|s| !s.is_empty());

        let timeout = match args.timeout {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => match env(HEAT_TIMEOUT_ENV).filter(|s| !s.trim().is_empty()) {
                Some(value) => Some(Duration::from_secs(value.trim().parse().map_err(|_| {
                    HeatError::Config(format!(
                        "{} must be a number of seconds, got '{}'",
                        HEAT_TIMEOUT_ENV, value
                    ))
                })?)),
                None => None,
            },
        };

        Ok(Self {
            endpoint,
            token,
            timeout,
            insecure: args.insecure,
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
