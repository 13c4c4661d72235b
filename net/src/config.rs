//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_RECONNECT_MS: u64 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Push-channel path on the coordinator.
pub const LIVE_PATH: &str = "/ws";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// HTTP base URL of the planning service, without a trailing slash.
    pub base_url: String,
    /// Fixed wait between push-channel reconnect attempts.
    pub reconnect_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `WALLPAINT_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `WALLPAINT_RECONNECT_MS`: default 3000
    /// - `WALLPAINT_TIMEOUT_SECS`: default 30
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("WALLPAINT_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let mut config = Self::new(&base_url);
        config.reconnect_delay =
            Duration::from_millis(parse_u64(lookup("WALLPAINT_RECONNECT_MS"), DEFAULT_RECONNECT_MS));
        config.request_timeout =
            Duration::from_secs(parse_u64(lookup("WALLPAINT_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS));
        config
    }

    /// Absolute URL for a REST path such as `/api/health`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Push-channel URL derived from the HTTP base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] unless the base URL is `http://`
    /// or `https://`.
    pub fn live_url(&self) -> Result<String, ApiError> {
        if let Some(rest) = self.base_url.strip_prefix("http://") {
            return Ok(format!("ws://{rest}{LIVE_PATH}"));
        }
        if let Some(rest) = self.base_url.strip_prefix("https://") {
            return Ok(format!("wss://{rest}{LIVE_PATH}"));
        }
        Err(ApiError::InvalidBaseUrl(self.base_url.clone()))
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}
