//! Bridge configuration
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Only the bot token is required; everything else has a default.

use std::env;

/// Main bridge configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Discord bot token (`Bot ...` authorization)
    pub token: String,
    /// Base URL of the Discord REST API
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Page size for guild member listings (Discord caps this at 1000)
    pub member_page_size: u16,
}

// Default value functions
fn default_api_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_member_page_size() -> u16 {
    1000
}

impl BridgeConfig {
    /// Load configuration from environment variables
    ///
    /// The token is read from `DISCORD_BOT_TOKEN`, falling back to
    /// `DISCORD_TOKEN`.
    ///
    /// # Errors
    /// Returns an error if no token variable is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let token = env::var("DISCORD_BOT_TOKEN")
            .or_else(|_| env::var("DISCORD_TOKEN"))
            .map_err(|_| ConfigError::MissingVar("DISCORD_BOT_TOKEN"))?;
        if token.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "DISCORD_BOT_TOKEN",
                "empty token".to_string(),
            ));
        }

        Ok(Self {
            token,
            api_base_url: env::var("DISCORD_API_BASE_URL")
                .unwrap_or_else(|_| default_api_base_url()),
            request_timeout_secs: env::var("DISCORD_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_request_timeout_secs),
            member_page_size: env::var("DISCORD_MEMBER_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_member_page_size)
                .clamp(1, 1000),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
