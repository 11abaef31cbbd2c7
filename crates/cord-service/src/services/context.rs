//! Service context - dependency container for services
//!
//! Holds the chat gateway and the resolution cache. Services borrow the
//! context rather than owning their dependencies, so a single gateway
//! connection and a single cache are shared across all operations.

use std::fmt;
use std::sync::Arc;

use cord_cache::ResolutionCache;
use cord_core::ChatGateway;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    gateway: Arc<dyn ChatGateway>,
    cache: Arc<ResolutionCache>,
}

impl ServiceContext {
    /// Create a context with a fresh, empty resolution cache
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            cache: Arc::new(ResolutionCache::new()),
        }
    }

    /// Create a context around an existing cache
    pub fn with_cache(gateway: Arc<dyn ChatGateway>, cache: Arc<ResolutionCache>) -> Self {
        Self { gateway, cache }
    }

    /// Get the chat gateway
    pub fn gateway(&self) -> &dyn ChatGateway {
        self.gateway.as_ref()
    }

    /// Get a shared handle to the chat gateway
    pub fn gateway_arc(&self) -> Arc<dyn ChatGateway> {
        Arc::clone(&self.gateway)
    }

    /// Get the resolution cache
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("cache_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}
