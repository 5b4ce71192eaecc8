//! Configuration types.

use std::time::Duration;

/// Portal connection configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the onboarding portal.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl PortalConfig {
    /// Build configuration from the environment.
    ///
    /// `PORTAL_URL` overrides the base URL, `PORTAL_TIMEOUT_SECS` the request
    /// timeout. Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("PORTAL_URL").unwrap_or(defaults.base_url);

        let request_timeout = std::env::var("PORTAL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            base_url,
            request_timeout,
        }
    }
}
