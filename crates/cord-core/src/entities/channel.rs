//! Channel entity - a channel visible to the bot

use crate::value_objects::Snowflake;

/// Channel kind, mapped from Discord's numeric channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    Dm,
    Voice,
    Category,
    Forum,
    /// Any type the bridge does not act on (threads, stages, ...)
    Other(u8),
}

impl ChannelKind {
    /// Map from Discord's wire type code
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Text,
            1 => Self::Dm,
            2 => Self::Voice,
            4 => Self::Category,
            15 => Self::Forum,
            other => Self::Other(other),
        }
    }

    /// Label used in channel listings
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Dm => "dm",
            Self::Voice => "voice",
            Self::Category => "category",
            Self::Forum => "forum",
            Self::Other(_) => "other",
        }
    }
}

/// Channel snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    /// Parent guild; `None` for DM channels
    pub guild_id: Option<Snowflake>,
    /// `None` for DM channels
    pub name: Option<String>,
    pub kind: ChannelKind,
    pub topic: Option<String>,
}

impl Channel {
    /// Create a guild text channel snapshot
    pub fn text(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id: Some(guild_id),
            name: Some(name.into()),
            kind: ChannelKind::Text,
            topic: None,
        }
    }

    /// Whether messages can be sent to this channel
    #[inline]
    pub const fn is_messageable(&self) -> bool {
        matches!(self.kind, ChannelKind::Text | ChannelKind::Dm)
    }

    /// Channel name, or the empty string for unnamed (DM) channels
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Case-insensitive exact name match
    pub fn matches_name(&self, needle_lower: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == needle_lower)
    }
}
