//! Resolution errors
//!
//! Every outcome of a target resolution that is not a single entity.
//! All variants are recoverable by the caller; the dispatch layer renders
//! them as user-facing text.

use thiserror::Error;

use crate::entities::Candidate;
use crate::value_objects::EntityKind;

use super::GatewayError;

/// Resolution failure taxonomy
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// Malformed scope syntax (empty scope or empty target)
    #[error("invalid target format: {0}")]
    InvalidFormat(String),

    /// No visible entity matches the token
    #[error("could not find {kind} '{token}'")]
    NotFound { kind: EntityKind, token: String },

    /// Two or more visible entities match an unscoped name query.
    /// Candidates are sorted by guild name for deterministic output.
    #[error("multiple {kind}s named '{token}' found in different servers")]
    Ambiguous {
        kind: EntityKind,
        token: String,
        candidates: Vec<Candidate>,
    },

    /// Collaborator failure, passed through unchanged
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ResolveError {
    /// Create an invalid-format error
    pub fn invalid_format(detail: impl Into<String>) -> Self {
        Self::InvalidFormat(detail.into())
    }

    /// Create a not-found error
    pub fn not_found(kind: EntityKind, token: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            token: token.into(),
        }
    }

    /// Create an ambiguous error; candidates must already be sorted
    pub fn ambiguous(
        kind: EntityKind,
        token: impl Into<String>,
        candidates: Vec<Candidate>,
    ) -> Self {
        Self::Ambiguous {
            kind,
            token: token.into(),
            candidates,
        }
    }

    /// Whether this is a not-found outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this is an ambiguity outcome
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;
