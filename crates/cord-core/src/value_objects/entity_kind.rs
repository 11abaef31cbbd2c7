//! Entity kind - the three resolvable namespaces

use std::fmt;

/// Kind of entity a target string can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A guild (what users call a "server")
    Server,
    /// A text channel within a guild
    Channel,
    /// A user, matched across mutual guild member lists
    User,
}

impl EntityKind {
    /// Lowercase label used in user-facing messages
    pub const fn label(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Channel => "channel",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
