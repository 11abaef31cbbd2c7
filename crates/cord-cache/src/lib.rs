//! # cord-cache
//!
//! In-process cache for target resolution. Best-effort by contract: no TTL,
//! no eviction, no invalidation, lifetime = process. Stale entries after a
//! remote rename are a deliberately accepted tradeoff.

pub mod resolution;

pub use resolution::{CacheKey, ResolutionCache};
