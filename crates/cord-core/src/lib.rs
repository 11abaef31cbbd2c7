//! # cord-core
//!
//! Domain layer containing entities, value objects, the gateway trait, and
//! the resolution error taxonomy. This crate has zero dependencies on
//! infrastructure (HTTP client, MCP transport, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Candidate, Channel, ChannelKind, Guild, Member, Message, ResolvedEntity, User,
};
pub use error::{GatewayError, GatewayResult, ResolveError, ResolveResult};
pub use traits::ChatGateway;
pub use value_objects::{EntityKind, Snowflake, SnowflakeParseError};
