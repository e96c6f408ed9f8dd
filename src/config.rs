//! Client configuration
//!
//! Loaded from a YAML or JSON file (JSON is valid YAML), then optionally
//! overridden from the environment.
//!
//! ```yaml
//! base_url: https://api.twitter.com/1.1
//! timeout_secs: 30
//! auth:
//!   type: bearer
//!   token: AAAA...
//! retry:
//!   cooldown_secs: 900
//! ```

use crate::auth::AuthConfig;
use crate::dispatch::RetryPolicy;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the bearer token
pub const ENV_BEARER_TOKEN: &str = "TWEETWALK_BEARER_TOKEN";

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "TWEETWALK_BASE_URL";

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, without trailing resource path
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent override
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,

    /// Credentials
    pub auth: AuthConfig,

    /// Retry timings
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: None,
            headers: HashMap::new(),
            auth: AuthConfig::None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Parses without validating; call [`ClientConfig::validate`] once
/// overrides have been applied.
impl std::str::FromStr for ClientConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}

impl ClientConfig {
    /// Load a config file
    ///
    /// Not validated here: a file may leave credentials for the
    /// environment to fill in.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config {}: {e}", path.display()),
            ))
        })?;
        content
            .parse::<Self>()
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(ENV_BEARER_TOKEN).filter(|t| !t.is_empty()) {
            self.auth = AuthConfig::bearer(token);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Check the config for unusable values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be positive"));
        }
        if let AuthConfig::Bearer { token } = &self.auth {
            if token.is_empty() {
                return Err(Error::config("auth.token must not be empty"));
            }
        }
        self.retry.validate()
    }

    /// HTTP transport settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}
