//! Guild entity - a Discord server visible to the bot

use crate::value_objects::Snowflake;

/// Guild (server) snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    /// Approximate member count, when the listing endpoint supplies it
    pub member_count: Option<i64>,
}

impl Guild {
    /// Create a new Guild snapshot
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            member_count: None,
        }
    }

    /// Set the approximate member count
    #[must_use]
    pub fn with_member_count(mut self, count: i64) -> Self {
        self.member_count = Some(count);
        self
    }

    /// Case-insensitive exact name match
    pub fn matches_name(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase() == needle_lower
    }
}
