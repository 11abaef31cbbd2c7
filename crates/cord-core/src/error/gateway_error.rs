//! Gateway (collaborator) errors
//!
//! Opaque to the resolution core: never retried or suppressed here, passed
//! through to the dispatch layer unchanged.

use thiserror::Error;

/// Errors surfaced by the chat-platform collaborator
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The platform rejected the request (includes permission denials)
    #[error("Discord API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Connectivity or protocol-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform returned a payload the client could not decode
    #[error("response decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Whether the platform reported a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Whether the platform reported a permission denial
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Api { status: 403, .. })
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
