//! Gateway configuration parsed from environment variables.

use std::time::Duration;

use super::GatewayError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

pub const BASE_URL_VAR: &str = "DROCK_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "DROCK_API_TIMEOUT_MS";
pub const CONNECT_TIMEOUT_VAR: &str = "DROCK_API_CONNECT_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    pub request: Duration,
    pub connect: Duration,
}

impl Default for GatewayTimeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            connect: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

/// Where the backend lives and how long to wait for it.
///
/// Fixed once the gateway is built; there is no runtime reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    pub timeouts: GatewayTimeouts,
}

impl GatewayConfig {
    /// Config for `base_url` with default timeouts. A trailing `/` is dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, timeouts: GatewayTimeouts::default() }
    }

    /// Replace the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request = timeout;
        self
    }

    /// Replace the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect = timeout;
        self
    }

    /// Build typed gateway config from environment variables.
    ///
    /// Optional:
    /// - `DROCK_API_BASE_URL`: default `http://localhost:8000`
    /// - `DROCK_API_TIMEOUT_MS`: default 10000
    /// - `DROCK_API_CONNECT_TIMEOUT_MS`: default 5000
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or a timeout is not a
    /// whole number of milliseconds.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        validate_base_url(&base_url)?;

        let timeouts = GatewayTimeouts {
            request: parse_millis(REQUEST_TIMEOUT_VAR, lookup(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_MS)?,
            connect: parse_millis(CONNECT_TIMEOUT_VAR, lookup(CONNECT_TIMEOUT_VAR), DEFAULT_CONNECT_TIMEOUT_MS)?,
        };

        Ok(Self { timeouts, ..Self::new(base_url) })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path, joined with exactly one `/`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

pub(crate) fn validate_base_url(base_url: &str) -> Result<(), GatewayError> {
    let rest = base_url
        .strip_prefix("http://")
        .or_else(|| base_url.strip_prefix("https://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(GatewayError::InvalidBaseUrl(base_url.to_owned())),
    }
}

fn parse_millis(key: &str, raw: Option<String>, default: u64) -> Result<Duration, GatewayError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(default));
    };
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| GatewayError::ConfigParse(format!("{key} must be milliseconds, got '{raw}'")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
