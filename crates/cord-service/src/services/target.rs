//! Target grammar - classification and scope parsing
//!
//! A caller-supplied target is either a raw snowflake id or a name, and a
//! name may carry a `Scope/Target` qualifier. Classification is syntactic
//! and total; only scope splitting can fail.

use cord_core::{ResolveError, ResolveResult, Snowflake};

/// Syntactic class of a single target token
///
/// Precedence: a token that parses as a snowflake is a raw id even when it
/// also starts with `#` or `@` stripped off - digits win over decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetToken {
    /// 17-20 digit id, resolved by direct lookup
    RawId(Snowflake),
    /// `#name` - explicitly a channel name
    ChannelName(String),
    /// `@name` - explicitly a user name
    UserName(String),
    /// Undecorated name
    Name(String),
}

impl TargetToken {
    /// Classify a trimmed token
    pub fn classify(token: &str) -> Self {
        if let Some(id) = Snowflake::classify(token) {
            return Self::RawId(id);
        }
        if let Some(rest) = token.strip_prefix('#') {
            if let Some(id) = Snowflake::classify(rest) {
                return Self::RawId(id);
            }
            return Self::ChannelName(rest.to_string());
        }
        if let Some(rest) = token.strip_prefix('@') {
            if let Some(id) = Snowflake::classify(rest) {
                return Self::RawId(id);
            }
            return Self::UserName(rest.to_string());
        }
        Self::Name(token.to_string())
    }

    /// The name payload with any sigil stripped (digits for a raw id)
    pub fn into_name(self) -> String {
        match self {
            Self::RawId(id) => id.to_string(),
            Self::ChannelName(name) | Self::UserName(name) | Self::Name(name) => name,
        }
    }
}

/// A parsed `Scope/Target` query
///
/// The scope is a server qualifier; `None` means search everywhere the
/// account can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedQuery {
    pub scope: Option<String>,
    pub target: String,
}

impl ScopedQuery {
    /// Parse a raw target string into scope and target parts
    ///
    /// Splits on the first `/` only, so the target part may itself contain
    /// slashes. A raw snowflake is never split (ids cannot contain `/`, the
    /// check just documents the precedence). Whitespace around either part
    /// is stripped; an empty part is a format error.
    pub fn parse(raw: &str) -> ResolveResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ResolveError::invalid_format("empty target"));
        }
        if Snowflake::classify(raw).is_some() {
            return Ok(Self::unscoped(raw));
        }
        match raw.split_once('/') {
            Some((scope, target)) => {
                let scope = scope.trim();
                let target = target.trim();
                if scope.is_empty() {
                    Err(ResolveError::invalid_format(format!(
                        "empty scope in '{raw}'"
                    )))
                } else if target.is_empty() {
                    Err(ResolveError::invalid_format(format!(
                        "empty target in '{raw}'"
                    )))
                } else {
                    Ok(Self {
                        scope: Some(scope.to_string()),
                        target: target.to_string(),
                    })
                }
            }
            None => Ok(Self::unscoped(raw)),
        }
    }

    /// A query with no scope qualifier
    pub fn unscoped(target: impl Into<String>) -> Self {
        Self {
            scope: None,
            target: target.into(),
        }
    }
}
