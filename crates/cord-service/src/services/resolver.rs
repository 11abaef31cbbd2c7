//! Target resolution
//!
//! Turns caller-supplied target strings into concrete entity ids. One
//! algorithm for servers, channels, and users; the per-kind listing and
//! lookup details live behind [`EntityDirectory`].
//!
//! Resolution order: raw id lookup, then scoped exact match, then an
//! unscoped cache-first scan across every visible server. Only unambiguous
//! unscoped results are cached, so a repeat query is answered without any
//! gateway traffic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use cord_cache::CacheKey;
use cord_core::{
    Candidate, ChannelKind, ChatGateway, EntityKind, GatewayResult, Guild, ResolveError,
    ResolveResult, ResolvedEntity, Snowflake,
};

use super::context::ServiceContext;
use super::target::{ScopedQuery, TargetToken};

/// Per-kind lookup and listing capability
#[async_trait]
trait EntityDirectory: Send + Sync {
    /// Direct lookup by id; `None` when the id is not visible
    async fn lookup_by_id(&self, id: Snowflake) -> GatewayResult<Option<ResolvedEntity>>;

    /// All entities of this kind inside one guild whose name matches the
    /// already-normalized needle
    async fn matches_in_guild(
        &self,
        guild: &Guild,
        name_lower: &str,
    ) -> GatewayResult<Vec<ResolvedEntity>>;
}

struct ServerDirectory {
    gateway: Arc<dyn ChatGateway>,
}

#[async_trait]
impl EntityDirectory for ServerDirectory {
    async fn lookup_by_id(&self, id: Snowflake) -> GatewayResult<Option<ResolvedEntity>> {
        Ok(self
            .gateway
            .fetch_guild(id)
            .await?
            .map(|guild| ResolvedEntity::from_guild(&guild)))
    }

    async fn matches_in_guild(
        &self,
        guild: &Guild,
        name_lower: &str,
    ) -> GatewayResult<Vec<ResolvedEntity>> {
        // The server namespace of a guild contains exactly that guild
        if guild.matches_name(name_lower) {
            Ok(vec![ResolvedEntity::from_guild(guild)])
        } else {
            Ok(Vec::new())
        }
    }
}

struct ChannelDirectory {
    gateway: Arc<dyn ChatGateway>,
}

#[async_trait]
impl EntityDirectory for ChannelDirectory {
    async fn lookup_by_id(&self, id: Snowflake) -> GatewayResult<Option<ResolvedEntity>> {
        Ok(self
            .gateway
            .fetch_channel(id)
            .await?
            .map(|channel| ResolvedEntity::from_channel(&channel)))
    }

    async fn matches_in_guild(
        &self,
        guild: &Guild,
        name_lower: &str,
    ) -> GatewayResult<Vec<ResolvedEntity>> {
        // Only text channels participate in name resolution
        Ok(self
            .gateway
            .guild_channels(guild.id)
            .await?
            .iter()
            .filter(|channel| channel.kind == ChannelKind::Text)
            .filter(|channel| channel.matches_name(name_lower))
            .map(ResolvedEntity::from_channel)
            .collect())
    }
}

struct UserDirectory {
    gateway: Arc<dyn ChatGateway>,
}

#[async_trait]
impl EntityDirectory for UserDirectory {
    async fn lookup_by_id(&self, id: Snowflake) -> GatewayResult<Option<ResolvedEntity>> {
        Ok(self
            .gateway
            .fetch_user(id)
            .await?
            .map(|user| ResolvedEntity::from_user(&user)))
    }

    async fn matches_in_guild(
        &self,
        guild: &Guild,
        name_lower: &str,
    ) -> GatewayResult<Vec<ResolvedEntity>> {
        // Members match on username, global display name, or server nick
        Ok(self
            .gateway
            .guild_members(guild.id)
            .await?
            .iter()
            .filter(|member| member.matches_name(name_lower))
            .map(ResolvedEntity::from_member)
            .collect())
    }
}

/// Target resolver
pub struct Resolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> Resolver<'a> {
    /// Create a new Resolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn directory(&self, kind: EntityKind) -> Box<dyn EntityDirectory> {
        let gateway = self.ctx.gateway_arc();
        match kind {
            EntityKind::Server => Box::new(ServerDirectory { gateway }),
            EntityKind::Channel => Box::new(ChannelDirectory { gateway }),
            EntityKind::User => Box::new(UserDirectory { gateway }),
        }
    }

    /// Resolve a raw caller-supplied target string
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn resolve_target(
        &self,
        kind: EntityKind,
        raw: &str,
    ) -> ResolveResult<ResolvedEntity> {
        let query = ScopedQuery::parse(raw)?;
        self.resolve_query(kind, &query).await
    }

    /// Resolve an already-parsed query
    pub async fn resolve_query(
        &self,
        kind: EntityKind,
        query: &ScopedQuery,
    ) -> ResolveResult<ResolvedEntity> {
        match TargetToken::classify(&query.target) {
            // An explicit id always wins and ignores any scope qualifier
            TargetToken::RawId(id) => self.lookup_id(kind, id, &query.target).await,
            token => {
                let name = token.into_name();
                match query.scope.as_deref() {
                    Some(scope) => self.resolve_scoped(kind, scope, &name).await,
                    None => self.resolve_name(kind, &name).await,
                }
            }
        }
    }

    async fn lookup_id(
        &self,
        kind: EntityKind,
        id: Snowflake,
        token: &str,
    ) -> ResolveResult<ResolvedEntity> {
        match self.directory(kind).lookup_by_id(id).await? {
            Some(entity) => Ok(entity),
            None => Err(ResolveError::not_found(kind, token)),
        }
    }

    /// Exact match inside one server. The scope itself goes through server
    /// resolution first, so it can be a name, an id, or itself ambiguous;
    /// scope failures propagate unchanged.
    async fn resolve_scoped(
        &self,
        kind: EntityKind,
        scope: &str,
        name: &str,
    ) -> ResolveResult<ResolvedEntity> {
        let server = match TargetToken::classify(scope) {
            TargetToken::RawId(id) => self.lookup_id(EntityKind::Server, id, scope).await?,
            token => {
                self.resolve_name(EntityKind::Server, &token.into_name())
                    .await?
            }
        };
        let guild = Guild::new(server.id, server.display_name.clone());
        let name_lower = name.trim().to_lowercase();
        let matches = self
            .directory(kind)
            .matches_in_guild(&guild, &name_lower)
            .await?;
        // Case-folded duplicates inside one guild are a server
        // misconfiguration; the first listing hit wins
        match matches.into_iter().next() {
            Some(entity) => Ok(entity),
            None => Err(ResolveError::not_found(kind, name)),
        }
    }

    /// Unscoped scan across every visible server, cache first
    async fn resolve_name(&self, kind: EntityKind, name: &str) -> ResolveResult<ResolvedEntity> {
        let key = CacheKey::new(kind, None, name);
        if let Some(id) = self.ctx.cache().get(&key) {
            debug!(%id, name, "resolution cache hit");
            let display_name = self
                .ctx
                .cache()
                .display_name(id)
                .unwrap_or_else(|| key.name().to_string());
            return Ok(ResolvedEntity {
                kind,
                id,
                display_name,
                guild_id: None,
            });
        }

        let directory = self.directory(kind);
        let name_lower = name.trim().to_lowercase();
        let guilds = self.ctx.gateway().list_guilds().await?;
        let mut matches: Vec<(String, ResolvedEntity)> = Vec::new();
        for guild in &guilds {
            for entity in directory.matches_in_guild(guild, &name_lower).await? {
                // The same entity can surface through several guilds (a user
                // in mutual servers); only distinct ids count as ambiguous
                if !matches.iter().any(|(_, seen)| seen.id == entity.id) {
                    matches.push((guild.name.clone(), entity));
                }
            }
        }

        match matches.len() {
            0 => Err(ResolveError::not_found(kind, name)),
            1 => {
                let (_, entity) = matches.remove(0);
                self.ctx.cache().put(key, entity.id);
                self.ctx
                    .cache()
                    .put_display_name(entity.id, entity.display_name.clone());
                debug!(id = %entity.id, name, "resolution cached");
                Ok(entity)
            }
            _ => {
                let mut candidates: Vec<Candidate> = matches
                    .iter()
                    .map(|(guild_name, entity)| {
                        Candidate::new(guild_name.clone(), entity.display_name.clone(), entity.id)
                    })
                    .collect();
                candidates.sort_by(|a, b| a.guild_name.cmp(&b.guild_name));
                Err(ResolveError::ambiguous(kind, name, candidates))
            }
        }
    }
}
