//! Harness configuration.
//!
//! # Design
//! The base URL is a value handed to `Harness::new`, never a process-wide
//! constant, so tests running in parallel can each point at their own mock
//! server. `from_env` exists for the live suite and CI overrides.

use std::time::Duration;

use crate::error::HarnessError;

/// Public reqres deployment the suite was written against.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/";

pub const BASE_URL_VAR: &str = "REQRES_BASE_URL";
pub const TIMEOUT_VAR: &str = "REQRES_TIMEOUT_SECS";
pub const API_KEY_VAR: &str = "REQRES_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub base_url: String,
    /// Overall per-request timeout. `None` leaves the transport default.
    pub timeout: Option<Duration>,
    /// Sent with every request, before request-specific headers.
    pub default_headers: Vec<(String, String)>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl HarnessConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: None,
            default_headers: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Build from `REQRES_BASE_URL`, `REQRES_TIMEOUT_SECS` and `REQRES_API_KEY`.
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HarnessError> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(HarnessError::Config(format!("{BASE_URL_VAR} is empty")));
        }
        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                HarnessError::Config(format!("{TIMEOUT_VAR} must be whole seconds, got {raw:?}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.is_empty()) {
            config = config.with_header("x-api-key", &key);
        }

        Ok(config)
    }
}
