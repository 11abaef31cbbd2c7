//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use cord_core::{GatewayError, ResolveError, Snowflake};

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Target resolution failure
    Resolve(ResolveError),

    /// Send fallback exhausted: the target matched neither a channel nor a
    /// user. Carries both underlying failures so callers can report each.
    TargetNotFound {
        target: String,
        channel_error: Box<ResolveError>,
        user_error: Box<ResolveError>,
    },

    /// A message id that no visible channel contains
    MessageNotFound(Snowflake),

    /// Malformed caller input
    Validation(String),

    /// Remote API failure
    Gateway(GatewayError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve(e) => write!(f, "{e}"),
            Self::TargetNotFound { target, .. } => {
                write!(f, "Could not find channel or user '{target}'")
            }
            Self::MessageNotFound(id) => write!(f, "Message not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Gateway(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resolve(e) => Some(e),
            Self::Gateway(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a send-fallback error from both lookup failures
    pub fn target_not_found(
        target: impl Into<String>,
        channel_error: ResolveError,
        user_error: ResolveError,
    ) -> Self {
        Self::TargetNotFound {
            target: target.into(),
            channel_error: Box::new(channel_error),
            user_error: Box::new(user_error),
        }
    }
}

impl From<ResolveError> for ServiceError {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
