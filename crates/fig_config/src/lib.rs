//! Configuration for FigDeck
//!
//! The Figma access token and API settings are loaded once by the server
//! binary and handed to the client constructor as an explicit value. Nothing
//! below this crate reads the environment.

use fig_common::{FigError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the Figma personal access token.
pub const TOKEN_ENV_VAR: &str = "FIGMA_TOKEN";

/// Environment variable overriding the API base URL (useful for tests).
pub const API_BASE_ENV_VAR: &str = "FIGMA_API_BASE";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Figma personal access token, sent as the `X-Figma-Token` header
    pub token: String,

    /// Base URL of the Figma REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.figma.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Build a configuration with defaults for everything but the token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load configuration from the process environment
    ///
    /// `FIGMA_TOKEN` is required; `FIGMA_API_BASE` optionally overrides the
    /// API endpoint.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                FigError::ConfigError(format!(
                    "{} environment variable is required",
                    TOKEN_ENV_VAR
                ))
            })?;

        let mut config = Self::new(token);
        if let Ok(base) = std::env::var(API_BASE_ENV_VAR) {
            if !base.trim().is_empty() {
                config.api_base = base.trim_end_matches('/').to_string();
            }
        }
        Ok(config)
    }
}
