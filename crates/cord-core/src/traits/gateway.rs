//! Chat gateway trait (port) - the narrow interface to the chat platform
//!
//! The domain layer defines what it needs; the infrastructure layer
//! (REST client, test fake) provides the implementation. Lookup fetches
//! return `Ok(None)` when the platform reports the entity does not exist
//! or is not visible to the bot; every other failure is a `GatewayError`.

use async_trait::async_trait;

use crate::entities::{Channel, Guild, Member, Message, User};
use crate::error::GatewayResult;
use crate::value_objects::Snowflake;

/// The chat-platform collaborator
#[async_trait]
pub trait ChatGateway: Send + Sync {
    // =========================================================================
    // Listings
    // =========================================================================

    /// All guilds visible to the bot
    async fn list_guilds(&self) -> GatewayResult<Vec<Guild>>;

    /// All channels of a guild
    async fn guild_channels(&self, guild_id: Snowflake) -> GatewayResult<Vec<Channel>>;

    /// All members of a guild
    async fn guild_members(&self, guild_id: Snowflake) -> GatewayResult<Vec<Member>>;

    // =========================================================================
    // Lookups by id
    // =========================================================================

    /// Fetch a guild by id, `None` if not visible
    async fn fetch_guild(&self, id: Snowflake) -> GatewayResult<Option<Guild>>;

    /// Fetch a channel by id, `None` if not visible
    async fn fetch_channel(&self, id: Snowflake) -> GatewayResult<Option<Channel>>;

    /// Fetch a user by id, `None` if not visible
    async fn fetch_user(&self, id: Snowflake) -> GatewayResult<Option<User>>;

    /// Fetch a single message, `None` if not visible in that channel
    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> GatewayResult<Option<Message>>;

    // =========================================================================
    // Message operations (pass-through, no domain logic)
    // =========================================================================

    /// Open (or reuse) the DM channel with a user
    async fn create_dm(&self, user_id: Snowflake) -> GatewayResult<Channel>;

    /// Send a message to a channel
    async fn send_message(&self, channel_id: Snowflake, content: &str) -> GatewayResult<Message>;

    /// Edit a message's content
    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        content: &str,
    ) -> GatewayResult<Message>;

    /// Delete a message
    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> GatewayResult<()>;

    /// Fetch recent messages, newest first. `before` pages backwards.
    async fn fetch_messages(
        &self,
        channel_id: Snowflake,
        limit: u8,
        before: Option<Snowflake>,
    ) -> GatewayResult<Vec<Message>>;

    /// Add a reaction to a message
    async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> GatewayResult<()>;
}
