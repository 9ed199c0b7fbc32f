//! API client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    pub fn request(self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the API, without a trailing slash.
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Config for `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `base_url` is not an `http(s)` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: Timeouts::default() })
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `AGRIBOARD_API_URL`: default `http://localhost:8000`
    /// - `AGRIBOARD_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AGRIBOARD_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a malformed URL or timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("AGRIBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let timeouts = Timeouts {
            request_secs: env_secs("AGRIBOARD_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_secs("AGRIBOARD_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { base_url: normalize_base_url(&base_url)?, timeouts })
    }

    /// Config baked in at compile time, for the browser build where there is
    /// no process environment.
    pub fn from_build_env() -> Self {
        let raw = option_env!("AGRIBOARD_API_URL").unwrap_or(DEFAULT_API_URL);
        Self::new(raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default API URL");
            Self { base_url: DEFAULT_API_URL.to_owned(), timeouts: Timeouts::default() }
        })
    }
}

fn env_secs(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(0) => Err(ConfigError::Invalid { var, reason: "must be greater than zero".into() }),
            Ok(secs) => Ok(secs),
            Err(e) => Err(ConfigError::Invalid { var, reason: e.to_string() }),
        },
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var: "AGRIBOARD_API_URL",
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
