//! Client configuration.
//!
//! The bridge base URL is an explicit constructor input rather than an
//! ambient process-wide lookup, so the client can be pointed at a mock
//! endpoint in tests.

use std::env;
use std::time::Duration;

use crate::error::Error;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the bridge-service base URL.
pub const ENV_BASE_URL: &str = "BRIDGE_SERVICE_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "BRIDGE_SERVICE_TIMEOUT_SECS";

/// Configuration for a [`crate::client::BridgeClient`].
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Base URL of the bridge service (e.g. `http://bridge.example:8080`).
    pub base_url: String,
    /// Request timeout applied to every bridge call.
    pub timeout: Duration,
}

impl BridgeConfig {
    /// Create a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the configuration from environment variables.
    ///
    /// `BRIDGE_SERVICE_URL` is required; `BRIDGE_SERVICE_TIMEOUT_SECS` is
    /// optional and defaults to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the URL variable is missing or the
    /// timeout variable is not a valid integer.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = env::var(ENV_BASE_URL).map_err(|_| {
            Error::Configuration(format!("{ENV_BASE_URL} environment variable not set"))
        })?;

        let timeout = match env::var(ENV_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    Error::Configuration(format!("invalid {ENV_TIMEOUT_SECS}: {raw}"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, timeout })
    }
}
