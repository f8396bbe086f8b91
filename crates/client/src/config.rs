//! Configuration for the Early client.

use crate::error::{EarlyError, EarlyResult};
use std::time::Duration;
use url::Url;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.timeular.com/api/v3";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "EARLY_API_KEY";

/// Environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "EARLY_API_SECRET";

/// Configuration for [`EarlyClient`](crate::EarlyClient).
#[derive(Debug, Clone)]
pub struct EarlyConfig {
    /// Base URL of the Early API.
    pub base_url: Url,
    /// Developer API key.
    pub api_key: String,
    /// Developer API secret.
    pub api_secret: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl EarlyConfig {
    /// Create a configuration with the production base URL.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            // The constant is a valid URL; parsing it cannot fail.
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Load credentials from `EARLY_API_KEY` and `EARLY_API_SECRET`.
    ///
    /// Fails with [`EarlyError::MissingCredentials`] if either variable is
    /// absent or empty.
    pub fn from_env() -> EarlyResult<Self> {
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();
        let api_secret = std::env::var(API_SECRET_VAR).unwrap_or_default();

        if api_key.is_empty() || api_secret.is_empty() {
            return Err(EarlyError::MissingCredentials);
        }

        Ok(Self::new(api_key, api_secret))
    }

    /// Override the base URL (used by tests to point at a mock server).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}
