//! API configuration
//!
//! Defaults target the production Moltbook API; environment variables
//! override them for development and tests.
//!
//! ## Environment Variables
//! - `MOLTPASS_API_BASE_URL`: API base URL (no trailing slash)
//! - `MOLTPASS_API_TIMEOUT_SECS`: request timeout in seconds

use std::time::Duration;

use tracing::debug;

/// Production API base path.
pub const DEFAULT_BASE_URL: &str = "https://www.moltbook.com/api/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Moltbook API gateway.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL requests are built against (e.g. `https://.../api/v1`).
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl ApiConfig {
    /// Build a config from the environment, falling back to defaults for
    /// anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("MOLTPASS_API_BASE_URL") {
            if !base_url.is_empty() {
                debug!(base_url = %base_url, "API base URL overridden from environment");
                config.base_url = base_url.trim_end_matches('/').to_string();
            }
        }

        if let Ok(raw) = std::env::var("MOLTPASS_API_TIMEOUT_SECS") {
            if let Ok(secs) = raw.parse::<u64>() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        config
    }
}
