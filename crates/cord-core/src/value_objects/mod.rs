//! Value objects for the domain layer

mod entity_kind;
mod snowflake;

pub use entity_kind::EntityKind;
pub use snowflake::{Snowflake, SnowflakeParseError};
