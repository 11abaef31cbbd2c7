//! User and guild-member entities

use crate::value_objects::Snowflake;

/// User snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// The unique handle (what `@name` mentions refer to)
    pub username: String,
    /// The account-wide display name, if the user set one
    pub global_name: Option<String>,
    pub bot: bool,
}

impl User {
    /// Create a new User snapshot
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            global_name: None,
            bot: false,
        }
    }

    /// Set the global display name
    #[must_use]
    pub fn with_global_name(mut self, name: impl Into<String>) -> Self {
        self.global_name = Some(name.into());
        self
    }

    /// Preferred display name: global name, falling back to the username
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// Guild member: a user plus per-guild state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user: User,
    /// Per-guild nickname
    pub nick: Option<String>,
}

impl Member {
    /// Wrap a user as a member with no nickname
    pub fn new(user: User) -> Self {
        Self { user, nick: None }
    }

    /// Set the guild nickname
    #[must_use]
    pub fn with_nick(mut self, nick: impl Into<String>) -> Self {
        self.nick = Some(nick.into());
        self
    }

    /// Preferred display name: nickname, then global name, then username
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or_else(|| self.user.display_name())
    }

    /// Case-insensitive exact match against any of the member's names
    /// (username, global display name, or guild nickname)
    pub fn matches_name(&self, needle_lower: &str) -> bool {
        if self.user.username.to_lowercase() == needle_lower {
            return true;
        }
        if self
            .user
            .global_name
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == needle_lower)
        {
            return true;
        }
        self.nick
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == needle_lower)
    }
}
