//! Console configuration.

use std::time::Duration;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "STOCKROOM_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "STOCKROOM_REQUEST_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Origin the `/api/product/...` routes hang off.
    pub api_base_url: String,
    /// `None` means requests run until they settle on their own.
    pub request_timeout: Option<Duration>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ConsoleConfig {
    /// Read `STOCKROOM_API_URL` / `STOCKROOM_REQUEST_TIMEOUT_SECS`, with defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty { var: API_URL_VAR });
            }
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout {
                    var: REQUEST_TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            // 0 disables the timeout.
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }
}
