//! Mention rewriting, both directions
//!
//! Outbound (`to_markup`): one left-to-right pass over caller text turning
//! `@name`, `@id`, and isolated bare ids into `<@id>` wire markup. Existing
//! markup passes through untouched, and a token that cannot be resolved is
//! left exactly as written. Text outside recognized tokens is never
//! modified.
//!
//! Inbound (`to_human`): total over any input; `<@id>` and `<@!id>` become
//! `@username`, or `@[id]` when the user cannot be looked up.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use cord_core::{EntityKind, Snowflake};

use super::context::ServiceContext;
use super::resolver::Resolver;
use super::target::ScopedQuery;

// One alternation so markup, @name tokens, and bare digit runs are claimed
// in a single pass and never overlap
static OUTBOUND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<@!?[0-9]+>|@[A-Za-z0-9_.]+|[0-9]{17,20}")
        .unwrap_or_else(|err| panic!("outbound mention pattern: {err}"))
});

static INBOUND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<@!?([0-9]+)>").unwrap_or_else(|err| panic!("inbound mention pattern: {err}"))
});

/// Mention processor
pub struct MentionProcessor<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MentionProcessor<'a> {
    /// Create a new MentionProcessor
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rewrite human-readable mentions to wire markup
    #[instrument(skip_all)]
    pub async fn to_markup(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for found in OUTBOUND_PATTERN.find_iter(text) {
            out.push_str(&text[last..found.start()]);
            let rewritten = self
                .rewrite_outbound(text, found.start(), found.end(), found.as_str())
                .await;
            out.push_str(&rewritten);
            last = found.end();
        }
        out.push_str(&text[last..]);
        out
    }

    async fn rewrite_outbound(&self, text: &str, start: usize, end: usize, token: &str) -> String {
        if token.starts_with('<') {
            // already wire markup
            return token.to_string();
        }
        if let Some(rest) = token.strip_prefix('@') {
            if let Some(id) = Snowflake::classify(rest) {
                return format!("<@{id}>");
            }
            let resolver = Resolver::new(self.ctx);
            return match resolver
                .resolve_query(EntityKind::User, &ScopedQuery::unscoped(rest))
                .await
            {
                Ok(user) => format!("<@{}>", user.id),
                // Never guess: an unresolved or ambiguous name stays as typed
                Err(err) => {
                    debug!(token, %err, "outbound mention left unresolved");
                    token.to_string()
                }
            };
        }
        // Bare digit run: rewrite only when isolated and the id is a
        // fetchable user, so message ids and the like pass through
        if !is_isolated(text, start, end) {
            return token.to_string();
        }
        let Some(id) = Snowflake::classify(token) else {
            return token.to_string();
        };
        match self.ctx.gateway().fetch_user(id).await {
            Ok(Some(_)) => format!("<@{id}>"),
            _ => token.to_string(),
        }
    }

    /// Rewrite wire markup to human-readable mentions. Total: unknown ids
    /// degrade to `@[id]`, everything else passes through unchanged.
    #[instrument(skip_all)]
    pub async fn to_human(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in INBOUND_PATTERN.captures_iter(text) {
            let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            out.push_str(&self.render_inbound(digits.as_str()).await);
            last = whole.end();
        }
        out.push_str(&text[last..]);
        out
    }

    async fn render_inbound(&self, digits: &str) -> String {
        match Snowflake::parse(digits) {
            Ok(id) => match self.lookup_username(id).await {
                Some(name) => format!("@{name}"),
                None => format!("@[{digits}]"),
            },
            Err(_) => format!("@[{digits}]"),
        }
    }

    /// Username for an id, memo first. A lookup failure degrades that one
    /// mention only.
    async fn lookup_username(&self, id: Snowflake) -> Option<String> {
        if let Some(name) = self.ctx.cache().display_name(id) {
            return Some(name);
        }
        match self.ctx.gateway().fetch_user(id).await {
            Ok(Some(user)) => {
                self.ctx.cache().put_display_name(id, user.username.clone());
                Some(user.username)
            }
            Ok(None) => None,
            Err(err) => {
                debug!(%id, %err, "inbound mention lookup failed");
                None
            }
        }
    }
}

/// Whether a bare digit run stands alone: not glued to markup characters,
/// letters, digits, or underscores on either side
fn is_isolated(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !(c == '<' || c == '@' || c.is_alphanumeric() || c == '_'));
    let after_ok = text[end..]
        .chars()
        .next()
        .is_none_or(|c| !(c == '>' || c.is_alphanumeric() || c == '_'));
    before_ok && after_ok
}
