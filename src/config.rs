//! Client configuration
//!
//! The analysis service base URL and the request timeout are resolved once
//! at startup and injected into the gateway at construction. Nothing in the
//! crate reads a hardcoded endpoint.

use std::time::Duration;

use crate::error::AdvisorError;
use crate::Result;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration injected into [`crate::gateway::HttpGateway`].
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Base endpoint, without the trailing `/predict/` or `/chat/` segment.
    pub base_url: String,
    /// Per-request timeout. The original client waited forever on a hung
    /// backend; a bounded wait surfaces as an ordinary transport failure.
    pub timeout: Duration,
}

impl AdvisorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve configuration from the environment.
    ///
    /// `ADVISOR_API_URL` defaults to the local development backend;
    /// `ADVISOR_TIMEOUT_SECS` defaults to 30.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("ADVISOR_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match std::env::var("ADVISOR_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AdvisorError::Config(format!(
                    "ADVISOR_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs)))
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
