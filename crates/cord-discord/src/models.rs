//! Wire payloads of the Discord REST API
//!
//! Thin deserialization targets; each converts into the corresponding
//! domain entity. Unknown fields are ignored everywhere, the API adds
//! fields routinely.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use cord_core::{Channel, ChannelKind, Guild, Member, Message, Snowflake, User};

#[derive(Debug, Clone, Deserialize)]
pub struct GuildData {
    pub id: Snowflake,
    pub name: String,
    #[serde(default)]
    pub approximate_member_count: Option<i64>,
}

impl From<GuildData> for Guild {
    fn from(data: GuildData) -> Self {
        let guild = Guild::new(data.id, data.name);
        match data.approximate_member_count {
            Some(count) => guild.with_member_count(count),
            None => guild,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelData {
    pub id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub topic: Option<String>,
}

impl From<ChannelData> for Channel {
    fn from(data: ChannelData) -> Self {
        Channel {
            id: data.id,
            guild_id: data.guild_id,
            name: data.name,
            kind: ChannelKind::from_code(data.kind),
            topic: data.topic,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl From<UserData> for User {
    fn from(data: UserData) -> Self {
        User {
            id: data.id,
            username: data.username,
            global_name: data.global_name,
            bot: data.bot,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberData {
    pub user: UserData,
    #[serde(default)]
    pub nick: Option<String>,
}

impl From<MemberData> for Member {
    fn from(data: MemberData) -> Self {
        Member {
            user: data.user.into(),
            nick: data.nick,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageData {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author: UserData,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<MessageData> for Message {
    fn from(data: MessageData) -> Self {
        Message {
            id: data.id,
            channel_id: data.channel_id,
            author: data.author.into(),
            content: data.content,
            timestamp: data.timestamp,
        }
    }
}

/// Error body the API attaches to non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
