//! In-memory gateway fake shared by the service unit tests
//!
//! Deliberately mirrored in `tests/integration/src/fake_gateway.rs`: the
//! integration member depends on this crate, so the fake cannot be shared
//! without a dedicated test-util crate. Gateway trait changes must be
//! applied to both copies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use cord_core::{
    Channel, ChannelKind, ChatGateway, GatewayResult, Guild, Member, Message, Snowflake, User,
};

/// Deterministic in-memory [`ChatGateway`]
///
/// Messages are stored newest first per channel, matching the wire order of
/// the real listing endpoint. Mutating calls are recorded so tests can
/// assert on what was sent, edited, deleted, or reacted to.
pub struct FakeGateway {
    pub guilds: Vec<Guild>,
    pub channels: HashMap<Snowflake, Vec<Channel>>,
    pub members: HashMap<Snowflake, Vec<Member>>,
    pub users: HashMap<Snowflake, User>,
    pub messages: Mutex<HashMap<Snowflake, Vec<Message>>>,
    pub sent: Mutex<Vec<(Snowflake, String)>>,
    pub edits: Mutex<Vec<(Snowflake, Snowflake, String)>>,
    pub deletions: Mutex<Vec<(Snowflake, Snowflake)>>,
    pub reactions: Mutex<Vec<(Snowflake, Snowflake, String)>>,
    pub list_guild_calls: AtomicUsize,
    pub fetch_user_calls: AtomicUsize,
    next_message_id: AtomicU64,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            guilds: Vec::new(),
            channels: HashMap::new(),
            members: HashMap::new(),
            users: HashMap::new(),
            messages: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            deletions: Mutex::new(Vec::new()),
            reactions: Mutex::new(Vec::new()),
            list_guild_calls: AtomicUsize::new(0),
            fetch_user_calls: AtomicUsize::new(0),
            next_message_id: AtomicU64::new(800_000_000_000_000_000),
        }
    }

    /// Two guilds, Alpha and Beta, with a colliding `general` channel.
    ///
    /// - Alpha (100..01): #general (200..01), #random (200..02)
    /// - Beta  (100..02): #general (210..01)
    /// - alice (300..01) is a member of both guilds
    /// - bob (300..02, nick "Bobby") is a member of Alpha only
    pub fn two_servers() -> Self {
        let alpha = Snowflake::new(100_000_000_000_000_001);
        let beta = Snowflake::new(100_000_000_000_000_002);
        let alice = User::new(Snowflake::new(300_000_000_000_000_001), "alice")
            .with_global_name("Alice A.");
        let bob = User::new(Snowflake::new(300_000_000_000_000_002), "bob");

        let mut gateway = Self::new();
        gateway.guilds = vec![
            Guild::new(alpha, "Alpha").with_member_count(2),
            Guild::new(beta, "Beta").with_member_count(1),
        ];
        gateway.channels.insert(
            alpha,
            vec![
                Channel::text(Snowflake::new(200_000_000_000_000_001), alpha, "general"),
                Channel::text(Snowflake::new(200_000_000_000_000_002), alpha, "random"),
            ],
        );
        gateway.channels.insert(
            beta,
            vec![Channel::text(
                Snowflake::new(210_000_000_000_000_001),
                beta,
                "general",
            )],
        );
        gateway.members.insert(
            alpha,
            vec![
                Member::new(alice.clone()),
                Member::new(bob.clone()).with_nick("Bobby"),
            ],
        );
        gateway.members.insert(beta, vec![Member::new(alice.clone())]);
        gateway.users.insert(alice.id, alice);
        gateway.users.insert(bob.id, bob);
        gateway
    }

    /// Seed a stored message (prepended, so it becomes the newest)
    pub fn seed_message(&self, channel_id: Snowflake, message: Message) {
        let mut messages = self.messages.lock().unwrap();
        messages.entry(channel_id).or_default().insert(0, message);
    }

    fn bot_user() -> User {
        User::new(Snowflake::new(700_000_000_000_000_001), "bridge-bot")
    }

    fn next_id(&self) -> Snowflake {
        Snowflake::new(self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatGateway for FakeGateway {
    async fn list_guilds(&self) -> GatewayResult<Vec<Guild>> {
        self.list_guild_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.guilds.clone())
    }

    async fn guild_channels(&self, guild_id: Snowflake) -> GatewayResult<Vec<Channel>> {
        Ok(self.channels.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn guild_members(&self, guild_id: Snowflake) -> GatewayResult<Vec<Member>> {
        Ok(self.members.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn fetch_guild(&self, id: Snowflake) -> GatewayResult<Option<Guild>> {
        Ok(self.guilds.iter().find(|guild| guild.id == id).cloned())
    }

    async fn fetch_channel(&self, id: Snowflake) -> GatewayResult<Option<Channel>> {
        Ok(self
            .channels
            .values()
            .flatten()
            .find(|channel| channel.id == id)
            .cloned())
    }

    async fn fetch_user(&self, id: Snowflake) -> GatewayResult<Option<User>> {
        self.fetch_user_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(&id).cloned())
    }

    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> GatewayResult<Option<Message>> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .get(&channel_id)
            .and_then(|channel| channel.iter().find(|m| m.id == message_id).cloned()))
    }

    async fn create_dm(&self, user_id: Snowflake) -> GatewayResult<Channel> {
        Ok(Channel {
            id: Snowflake::new(user_id.into_inner() + 600_000_000_000_000_000),
            guild_id: None,
            name: None,
            kind: ChannelKind::Dm,
            topic: None,
        })
    }

    async fn send_message(&self, channel_id: Snowflake, content: &str) -> GatewayResult<Message> {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, content.to_string()));
        let message = Message::new(self.next_id(), channel_id, Self::bot_user(), content);
        self.seed_message(channel_id, message.clone());
        Ok(message)
    }

    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        content: &str,
    ) -> GatewayResult<Message> {
        self.edits
            .lock()
            .unwrap()
            .push((channel_id, message_id, content.to_string()));
        let mut messages = self.messages.lock().unwrap();
        let stored = messages
            .entry(channel_id)
            .or_default()
            .iter_mut()
            .find(|m| m.id == message_id);
        match stored {
            Some(message) => {
                message.content = content.to_string();
                Ok(message.clone())
            }
            None => Ok(Message::new(
                message_id,
                channel_id,
                Self::bot_user(),
                content,
            )),
        }
    }

    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> GatewayResult<()> {
        self.deletions.lock().unwrap().push((channel_id, message_id));
        let mut messages = self.messages.lock().unwrap();
        if let Some(channel) = messages.get_mut(&channel_id) {
            channel.retain(|m| m.id != message_id);
        }
        Ok(())
    }

    async fn fetch_messages(
        &self,
        channel_id: Snowflake,
        limit: u8,
        before: Option<Snowflake>,
    ) -> GatewayResult<Vec<Message>> {
        let messages = self.messages.lock().unwrap();
        let channel = messages.get(&channel_id).cloned().unwrap_or_default();
        Ok(channel
            .into_iter()
            .filter(|m| before.is_none_or(|cursor| m.id < cursor))
            .take(limit as usize)
            .collect())
    }

    async fn add_reaction(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> GatewayResult<()> {
        self.reactions
            .lock()
            .unwrap()
            .push((channel_id, message_id, emoji.to_string()));
        Ok(())
    }
}
