//! Discord REST gateway
//!
//! Implements [`ChatGateway`] over the HTTP API. One `reqwest::Client` with
//! the bot Authorization header baked in; every call is a single request
//! except the member listing, which pages until the API runs dry.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use cord_core::{
    Channel, ChatGateway, GatewayError, GatewayResult, Guild, Member, Message, Snowflake, User,
};

use crate::config::RestConfig;
use crate::models::{ApiErrorBody, ChannelData, GuildData, MemberData, MessageData, UserData};

/// REST implementation of the chat gateway
pub struct RestGateway {
    http: reqwest::Client,
    base_url: String,
    member_page_size: u16,
}

impl RestGateway {
    /// Build the client; fails only on an unusable token or TLS setup
    pub fn new(config: RestConfig) -> GatewayResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.token))
            .map_err(|_| GatewayError::transport("token contains invalid header characters"))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            member_page_size: config.member_page_size,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| GatewayError::decode(err.to_string()))
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> GatewayError {
        // Best effort: the error body has a message field, but permission
        // proxies and load balancers sometimes return something else
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        GatewayError::api(status.as_u16(), message)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        debug!(path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;
        Self::decode(response).await
    }

    /// GET where 404 means "not visible", not an error
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<Option<T>> {
        match self.get_json::<T>(path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> GatewayResult<T> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;
        Self::decode(response).await
    }

    async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> GatewayResult<T> {
        debug!(path, "PATCH");
        let response = self
            .http
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;
        Self::decode(response).await
    }

    async fn send_expecting_no_content(
        &self,
        request: reqwest::RequestBuilder,
    ) -> GatewayResult<()> {
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }
}

#[async_trait]
impl ChatGateway for RestGateway {
    #[instrument(skip(self))]
    async fn list_guilds(&self) -> GatewayResult<Vec<Guild>> {
        let guilds: Vec<GuildData> = self.get_json("/users/@me/guilds?with_counts=true").await?;
        Ok(guilds.into_iter().map(Guild::from).collect())
    }

    async fn guild_channels(&self, guild_id: Snowflake) -> GatewayResult<Vec<Channel>> {
        let channels: Vec<ChannelData> =
            self.get_json(&format!("/guilds/{guild_id}/channels")).await?;
        Ok(channels.into_iter().map(Channel::from).collect())
    }

    #[instrument(skip(self))]
    async fn guild_members(&self, guild_id: Snowflake) -> GatewayResult<Vec<Member>> {
        let mut members = Vec::new();
        let mut after: Option<Snowflake> = None;
        loop {
            let mut path = format!(
                "/guilds/{guild_id}/members?limit={}",
                self.member_page_size
            );
            if let Some(cursor) = after {
                path.push_str(&format!("&after={cursor}"));
            }
            let page: Vec<MemberData> = self.get_json(&path).await?;
            if page.is_empty() {
                break;
            }
            let page_len = page.len();
            after = page.last().map(|m| m.user.id);
            members.extend(page.into_iter().map(Member::from));
            if page_len < usize::from(self.member_page_size) {
                break;
            }
        }
        debug!(guild_id = %guild_id, count = members.len(), "members listed");
        Ok(members)
    }

    async fn fetch_guild(&self, id: Snowflake) -> GatewayResult<Option<Guild>> {
        let guild: Option<GuildData> = self
            .get_optional(&format!("/guilds/{id}?with_counts=true"))
            .await?;
        Ok(guild.map(Guild::from))
    }

    async fn fetch_channel(&self, id: Snowflake) -> GatewayResult<Option<Channel>> {
        let channel: Option<ChannelData> = self.get_optional(&format!("/channels/{id}")).await?;
        Ok(channel.map(Channel::from))
    }

    async fn fetch_user(&self, id: Snowflake) -> GatewayResult<Option<User>> {
        let user: Option<UserData> = self.get_optional(&format!("/users/{id}")).await?;
        Ok(user.map(User::from))
    }

    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> GatewayResult<Option<Message>> {
        let message: Option<MessageData> = self
            .get_optional(&format!("/channels/{channel_id}/messages/{message_id}"))
            .await?;
        Ok(message.map(Message::from))
    }

    async fn create_dm(&self, user_id: Snowflake) -> GatewayResult<Channel> {
        let channel: ChannelData = self
            .post_json(
                "/users/@me/channels",
                &json!({ "recipient_id": user_id.to_string() }),
            )
            .await?;
        Ok(channel.into())
    }

    #[instrument(skip(self, content))]
    async fn send_message(&self, channel_id: Snowflake, content: &str) -> GatewayResult<Message> {
        let message: MessageData = self
            .post_json(
                &format!("/channels/{channel_id}/messages"),
                &json!({ "content": content }),
            )
            .await?;
        Ok(message.into())
    }

    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        content: &str,
    ) -> GatewayResult<Message> {
        let message: MessageData = self
            .patch_json(
                &format!("/channels/{channel_id}/messages/{message_id}"),
                &json!({ "content": content }),
            )
            .await?;
        Ok(message.into())
    }

    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> GatewayResult<()> {
        let url = self.url(&format!("/channels/{channel_id}/messages/{message_id}"));
        self.send_expecting_no_content(self.http.delete(url)).await
    }

    async fn fetch_messages(
        &self,
        channel_id: Snowflake,
        limit: u8,
        before: Option<Snowflake>,
    ) -> GatewayResult<Vec<Message>> {
        let mut path = format!("/channels/{channel_id}/messages?limit={limit}");
        if let Some(cursor) = before {
            path.push_str(&format!("&before={cursor}"));
        }
        let messages: Vec<MessageData> = self.get_json(&path).await?;
        Ok(messages.into_iter().map(Message::from).collect())
    }

    async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> GatewayResult<()> {
        let encoded = utf8_percent_encode(emoji, NON_ALPHANUMERIC);
        let url = self.url(&format!(
            "/channels/{channel_id}/messages/{message_id}/reactions/{encoded}/@me"
        ));
        self.send_expecting_no_content(self.http.put(url)).await
    }
}
