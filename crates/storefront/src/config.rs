//! Environment-driven configuration for the client shell.

use std::time::Duration;

use jewelmart_account::REDIRECT_DELAY;

/// Base URL of the hosted backend when none is configured.
const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Configuration for the storefront shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Base URL of the remote identity store.
    pub api_url: String,
    /// Optional bearer token forwarded to the backend.
    pub api_token: Option<String>,
    /// Delay between reset success and the login redirect.
    pub redirect_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            redirect_delay: REDIRECT_DELAY,
        }
    }
}

impl StorefrontConfig {
    /// Read configuration from the process environment.
    ///
    /// `JEWELMART_API_URL`, `JEWELMART_API_TOKEN`, and (for test/demo
    /// shells) `JEWELMART_REDIRECT_MS`; each falls back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Deterministic core of `from_env`, driven by any lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let redirect_delay = lookup("JEWELMART_REDIRECT_MS")
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparseable JEWELMART_REDIRECT_MS");
                    None
                }
            })
            .unwrap_or(defaults.redirect_delay);

        Self {
            api_url: lookup("JEWELMART_API_URL").unwrap_or(defaults.api_url),
            api_token: lookup("JEWELMART_API_TOKEN"),
            redirect_delay,
        }
    }
}
