//! REST client configuration

/// Settings for the Discord REST client
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Bot token, sent as `Bot {token}` in the Authorization header
    pub token: String,
    /// API base, e.g. `https://discord.com/api/v10`
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Page size for the member listing endpoint (Discord caps it at 1000)
    pub member_page_size: u16,
}

impl RestConfig {
    /// Configuration with production defaults for everything but the token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base_url: "https://discord.com/api/v10".to_string(),
            request_timeout_secs: 30,
            member_page_size: 1000,
        }
    }
}
