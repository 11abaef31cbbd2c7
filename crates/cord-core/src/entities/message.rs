//! Message entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

use super::User;

/// Message snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author: User,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new Message snapshot
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        author: User,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            channel_id,
            author,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
