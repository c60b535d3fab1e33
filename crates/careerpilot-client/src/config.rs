//! Client configuration for the CareerPilot backend.
//!
//! The base URL can come from the `CAREERPILOT_API_URL` environment
//! variable; it defaults to the local development server.

use careerpilot_core::{CareerError, Result};
use std::env;
use std::time::Duration;

/// Default backend base URL (the local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

const API_URL_ENV: &str = "CAREERPILOT_API_URL";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by the HTTP collaborators.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from the environment.
    ///
    /// `CAREERPILOT_API_URL` overrides the base URL when set.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the shared `reqwest` client for this configuration.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| CareerError::internal(format!("Failed to build HTTP client: {err}")))
    }
}
