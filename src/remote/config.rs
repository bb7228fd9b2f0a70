//! Endpoint configuration.
//!
//! The registration endpoint is a single script URL; every request is a GET
//! against it with different query parameters.

use url::Url;

use crate::utils::FormError;

pub const SCRIPT_URL_VAR: &str = "REGFORM_SCRIPT_URL";
pub const TIMEOUT_VAR: &str = "REGFORM_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Deployed script URL, e.g. `https://script.google.com/macros/s/<id>/exec`.
    pub script_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl EndpointConfig {
    pub fn new(script_url: Url) -> Self {
        EndpointConfig {
            script_url,
            timeout_secs: None,
        }
    }

    pub fn parse(script_url: &str) -> Result<Self, FormError> {
        let url = Url::parse(script_url)
            .map_err(|e| FormError::Config(format!("invalid script URL {}: {}", script_url, e)))?;
        Ok(Self::new(url))
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// - `REGFORM_SCRIPT_URL` (required)
    /// - `REGFORM_TIMEOUT_SECS` (optional, no timeout when unset)
    pub fn from_env() -> Result<Self, FormError> {
        let raw = std::env::var(SCRIPT_URL_VAR)
            .map_err(|_| FormError::Config(format!("{} environment variable is required", SCRIPT_URL_VAR)))?;
        let mut config = Self::parse(&raw)?;

        if let Ok(secs) = std::env::var(TIMEOUT_VAR) {
            let secs = secs
                .parse()
                .map_err(|_| FormError::Config(format!("{} must be a whole number of seconds", TIMEOUT_VAR)))?;
            config.timeout_secs = Some(secs);
        }

        Ok(config)
    }
}
