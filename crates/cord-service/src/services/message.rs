//! Message service
//!
//! The message use cases: send with channel-then-DM fallback, edit or
//! delete by id, read recent history, search, react, and the two listings.
//! All results are structured outcomes; rendering them as text is the
//! dispatch layer's job.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use cord_core::{
    Channel, ChannelKind, EntityKind, Guild, Message, ResolveError, ResolvedEntity, Snowflake,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::mention::MentionProcessor;
use super::resolver::Resolver;
use super::target::ScopedQuery;

/// Hard cap on messages fetched by a read
const READ_LIMIT_MAX: u8 = 100;

/// Hard cap on messages scanned by a search
const SEARCH_SCAN_MAX: u16 = 500;

/// Page size of the history listing endpoint
const HISTORY_PAGE: u8 = 100;

/// Where a sent message ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Channel {
        name: String,
        guild_name: Option<String>,
    },
    Dm {
        username: String,
    },
}

/// Outcome of a send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub message_id: Snowflake,
    pub destination: Destination,
}

/// Outcome of an edit-or-delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Edited {
        message_id: Snowflake,
        channel_name: String,
    },
    Deleted {
        message_id: Snowflake,
        channel_name: String,
    },
}

/// Channel metadata shown above a history listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHeader {
    pub id: Snowflake,
    pub name: String,
    pub kind_label: &'static str,
    pub topic: Option<String>,
    pub guild_name: Option<String>,
}

/// One message, mentions already humanized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub id: Snowflake,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// A read result, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelHistory {
    pub header: ChannelHeader,
    pub messages: Vec<RenderedMessage>,
}

/// A search result, matches oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub channel_name: String,
    pub query: String,
    pub scanned: usize,
    pub matches: Vec<RenderedMessage>,
}

/// Outcome of adding a reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionReceipt {
    pub message_id: Snowflake,
    pub channel_name: String,
    pub emoji: String,
}

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message to a channel or, when no channel matches, as a DM
    ///
    /// Fallback applies only to a clean channel miss; an ambiguous or
    /// malformed channel target is reported directly so the caller can
    /// disambiguate instead of silently DMing someone.
    #[instrument(skip(self, body))]
    pub async fn send(&self, target: &str, body: &str) -> ServiceResult<SendReceipt> {
        let query = ScopedQuery::parse(target)?;
        let resolver = Resolver::new(self.ctx);
        let mentions = MentionProcessor::new(self.ctx);

        let channel_error = match resolver.resolve_query(EntityKind::Channel, &query).await {
            Ok(channel) => {
                let content = mentions.to_markup(body).await;
                let sent = self.ctx.gateway().send_message(channel.id, &content).await?;
                let guild_name = self.guild_name_of(channel.guild_id).await;
                info!(message_id = %sent.id, channel = %channel.display_name, "message sent");
                return Ok(SendReceipt {
                    message_id: sent.id,
                    destination: Destination::Channel {
                        name: channel.display_name,
                        guild_name,
                    },
                });
            }
            Err(err @ ResolveError::NotFound { .. }) => err,
            Err(err) => return Err(err.into()),
        };

        // DM fallback resolves the bare target; a scope qualifier only
        // makes sense for channels
        match resolver
            .resolve_query(EntityKind::User, &ScopedQuery::unscoped(&query.target))
            .await
        {
            Ok(user) => {
                let dm = self.ctx.gateway().create_dm(user.id).await?;
                let content = mentions.to_markup(body).await;
                let sent = self.ctx.gateway().send_message(dm.id, &content).await?;
                info!(message_id = %sent.id, user = %user.display_name, "dm sent");
                Ok(SendReceipt {
                    message_id: sent.id,
                    destination: Destination::Dm {
                        username: user.display_name,
                    },
                })
            }
            Err(user_error) => Err(ServiceError::target_not_found(
                query.target,
                channel_error,
                user_error,
            )),
        }
    }

    /// Edit a message found by id, or delete it when the new content is blank
    #[instrument(skip(self, new_content))]
    pub async fn edit_or_delete(
        &self,
        message_id: &str,
        new_content: &str,
    ) -> ServiceResult<EditOutcome> {
        let id = self.parse_message_id(message_id)?;
        let (channel, _message) = self.find_message(id).await?;
        let channel_name = channel.display_name().to_string();
        if new_content.trim().is_empty() {
            self.ctx.gateway().delete_message(channel.id, id).await?;
            info!(message_id = %id, channel = %channel_name, "message deleted");
            Ok(EditOutcome::Deleted {
                message_id: id,
                channel_name,
            })
        } else {
            let content = MentionProcessor::new(self.ctx).to_markup(new_content).await;
            self.ctx
                .gateway()
                .edit_message(channel.id, id, &content)
                .await?;
            info!(message_id = %id, channel = %channel_name, "message edited");
            Ok(EditOutcome::Edited {
                message_id: id,
                channel_name,
            })
        }
    }

    /// Read recent history of a channel, oldest first
    #[instrument(skip(self))]
    pub async fn read(
        &self,
        channel_target: &str,
        limit: Option<u8>,
    ) -> ServiceResult<ChannelHistory> {
        let limit = limit.unwrap_or(50).min(READ_LIMIT_MAX).max(1);
        let resolved = Resolver::new(self.ctx)
            .resolve_target(EntityKind::Channel, channel_target)
            .await?;
        let header = self.channel_header(&resolved).await;
        let raw = self
            .ctx
            .gateway()
            .fetch_messages(resolved.id, limit, None)
            .await?;

        let mentions = MentionProcessor::new(self.ctx);
        let mut messages = Vec::with_capacity(raw.len());
        for message in raw {
            messages.push(Self::render(&mentions, message).await);
        }
        messages.reverse();
        Ok(ChannelHistory { header, messages })
    }

    /// Case-insensitive substring search over recent channel history
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        channel_target: &str,
        query: &str,
        limit: Option<u16>,
    ) -> ServiceResult<SearchResults> {
        let scan_limit = usize::from(limit.unwrap_or(100).min(SEARCH_SCAN_MAX).max(1));
        let resolved = Resolver::new(self.ctx)
            .resolve_target(EntityKind::Channel, channel_target)
            .await?;

        let needle = query.to_lowercase();
        let mentions = MentionProcessor::new(self.ctx);
        let mut matches = Vec::new();
        let mut scanned = 0usize;
        let mut before = None;
        while scanned < scan_limit {
            let page_size = (scan_limit - scanned).min(usize::from(HISTORY_PAGE)) as u8;
            let page = self
                .ctx
                .gateway()
                .fetch_messages(resolved.id, page_size, before)
                .await?;
            if page.is_empty() {
                break;
            }
            scanned += page.len();
            before = page.last().map(|m| m.id);
            let exhausted = page.len() < usize::from(page_size);
            for message in page {
                if message.content.to_lowercase().contains(&needle) {
                    matches.push(Self::render(&mentions, message).await);
                }
            }
            if exhausted {
                break;
            }
        }
        matches.reverse();
        Ok(SearchResults {
            channel_name: resolved.display_name,
            query: query.to_string(),
            scanned,
            matches,
        })
    }

    /// Add a reaction to a message found by id
    #[instrument(skip(self))]
    pub async fn react(&self, message_id: &str, emoji: &str) -> ServiceResult<ReactionReceipt> {
        let id = self.parse_message_id(message_id)?;
        let (channel, _message) = self.find_message(id).await?;
        self.ctx.gateway().add_reaction(channel.id, id, emoji).await?;
        info!(message_id = %id, emoji, "reaction added");
        Ok(ReactionReceipt {
            message_id: id,
            channel_name: channel.display_name().to_string(),
            emoji: emoji.to_string(),
        })
    }

    /// All servers visible to the account
    #[instrument(skip(self))]
    pub async fn list_servers(&self) -> ServiceResult<Vec<Guild>> {
        Ok(self.ctx.gateway().list_guilds().await?)
    }

    /// All channels of one server
    #[instrument(skip(self))]
    pub async fn list_channels(
        &self,
        server_target: &str,
    ) -> ServiceResult<(ResolvedEntity, Vec<Channel>)> {
        let server = Resolver::new(self.ctx)
            .resolve_target(EntityKind::Server, server_target)
            .await?;
        let channels = self.ctx.gateway().guild_channels(server.id).await?;
        Ok((server, channels))
    }

    fn parse_message_id(&self, raw: &str) -> ServiceResult<Snowflake> {
        Snowflake::classify(raw.trim()).ok_or_else(|| {
            ServiceError::validation(format!(
                "'{raw}' is not a valid message ID. Message IDs must be 17-20 digit numbers."
            ))
        })
    }

    /// Scan visible text channels for a message id. A per-channel fetch
    /// failure counts as a miss (no access to that channel), the scan
    /// continues.
    async fn find_message(&self, id: Snowflake) -> ServiceResult<(Channel, Message)> {
        for guild in self.ctx.gateway().list_guilds().await? {
            for channel in self.ctx.gateway().guild_channels(guild.id).await? {
                if channel.kind != ChannelKind::Text {
                    continue;
                }
                if let Ok(Some(message)) = self.ctx.gateway().fetch_message(channel.id, id).await {
                    return Ok((channel, message));
                }
            }
        }
        Err(ServiceError::MessageNotFound(id))
    }

    async fn guild_name_of(&self, guild_id: Option<Snowflake>) -> Option<String> {
        match guild_id {
            Some(id) => self
                .ctx
                .gateway()
                .fetch_guild(id)
                .await
                .ok()
                .flatten()
                .map(|guild| guild.name),
            None => None,
        }
    }

    /// Fresh metadata for the history header; a cache-hit resolution
    /// carries no topic or guild, so the channel is fetched again
    async fn channel_header(&self, resolved: &ResolvedEntity) -> ChannelHeader {
        let channel = self.ctx.gateway().fetch_channel(resolved.id).await.ok().flatten();
        let guild_id = channel
            .as_ref()
            .and_then(|c| c.guild_id)
            .or(resolved.guild_id);
        let guild_name = self.guild_name_of(guild_id).await;
        ChannelHeader {
            id: resolved.id,
            name: channel
                .as_ref()
                .map(|c| c.display_name().to_string())
                .unwrap_or_else(|| resolved.display_name.clone()),
            kind_label: channel.as_ref().map(|c| c.kind.label()).unwrap_or("text"),
            topic: channel.and_then(|c| c.topic),
            guild_name,
        }
    }

    async fn render(mentions: &MentionProcessor<'_>, message: Message) -> RenderedMessage {
        RenderedMessage {
            id: message.id,
            author: message.author.username.clone(),
            timestamp: message.timestamp,
            content: mentions.to_human(&message.content).await,
        }
    }
}
