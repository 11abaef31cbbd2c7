//! Resolution outcomes - the snapshot a successful resolve returns and the
//! candidate list an ambiguous one carries

use crate::value_objects::{EntityKind, Snowflake};

use super::{Channel, Guild, Member, User};

/// A successfully resolved entity
///
/// Immutable snapshot handed to callers; never shared mutable state.
/// `guild_id` is set for channels resolved through a guild listing and
/// absent otherwise (servers, users, and cache hits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    pub kind: EntityKind,
    pub id: Snowflake,
    pub display_name: String,
    pub guild_id: Option<Snowflake>,
}

impl ResolvedEntity {
    /// Snapshot of a guild
    pub fn from_guild(guild: &Guild) -> Self {
        Self {
            kind: EntityKind::Server,
            id: guild.id,
            display_name: guild.name.clone(),
            guild_id: None,
        }
    }

    /// Snapshot of a channel
    pub fn from_channel(channel: &Channel) -> Self {
        Self {
            kind: EntityKind::Channel,
            id: channel.id,
            display_name: channel.display_name().to_string(),
            guild_id: channel.guild_id,
        }
    }

    /// Snapshot of a user
    ///
    /// The display name is the mentionable handle (username), so outbound
    /// and inbound mention rewrites round-trip.
    pub fn from_user(user: &User) -> Self {
        Self {
            kind: EntityKind::User,
            id: user.id,
            display_name: user.username.clone(),
            guild_id: None,
        }
    }

    /// Snapshot of a member's user
    pub fn from_member(member: &Member) -> Self {
        Self::from_user(&member.user)
    }
}

/// One entry of an ambiguous resolution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub guild_name: String,
    pub display_name: String,
    pub id: Snowflake,
}

impl Candidate {
    /// Create a candidate entry
    pub fn new(
        guild_name: impl Into<String>,
        display_name: impl Into<String>,
        id: Snowflake,
    ) -> Self {
        Self {
            guild_name: guild_name.into(),
            display_name: display_name.into(),
            id,
        }
    }
}
