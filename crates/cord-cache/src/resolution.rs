//! Resolution cache
//!
//! Maps `(kind, scope, normalized name)` to a resolved snowflake, plus an
//! id-to-display-name memo for the inbound mention direction. Backed by
//! `DashMap`: concurrent gets and puts are safe, each put is atomic with
//! respect to other puts on the same key. Two concurrent misses that both
//! resolve and write the same key is a benign race (last write wins, values
//! are equal in practice since they derive from the same remote truth).

use dashmap::DashMap;

use cord_core::{EntityKind, Snowflake};

/// Cache key: entity kind plus normalized scope and name
///
/// Normalization is trim + Unicode lowercase. An absent scope is the empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: EntityKind,
    scope: String,
    name: String,
}

impl CacheKey {
    /// Build a key, normalizing both parts
    pub fn new(kind: EntityKind, scope: Option<&str>, name: &str) -> Self {
        Self {
            kind,
            scope: scope.map(normalize).unwrap_or_default(),
            name: normalize(name),
        }
    }

    /// The normalized name component
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Process-wide resolution cache
///
/// Explicitly constructed and injected (never a module-level singleton) so
/// tests get a fresh store and the best-effort consistency contract stays
/// visible at the type level.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    ids: DashMap<CacheKey, Snowflake>,
    display_names: DashMap<Snowflake, String>,
}

impl ResolutionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a resolved id
    pub fn get(&self, key: &CacheKey) -> Option<Snowflake> {
        self.ids.get(key).map(|entry| *entry)
    }

    /// Record a successful resolution. Idempotent; never invalidated.
    pub fn put(&self, key: CacheKey, id: Snowflake) {
        self.ids.insert(key, id);
    }

    /// Reverse memo: display name for an id (users, for inbound mentions)
    pub fn display_name(&self, id: Snowflake) -> Option<String> {
        self.display_names.get(&id).map(|entry| entry.clone())
    }

    /// Record a display name for an id
    pub fn put_display_name(&self, id: Snowflake, name: impl Into<String>) {
        self.display_names.insert(id, name.into());
    }

    /// Number of cached name-to-id entries
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the name-to-id table is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
