//! Entity snapshots returned by the gateway
//!
//! These are immutable read models of remote platform state, not
//! aggregates the bridge owns or mutates.

mod channel;
mod guild;
mod message;
mod resolved;
mod user;

pub use channel::{Channel, ChannelKind};
pub use guild::Guild;
pub use message::Message;
pub use resolved::{Candidate, ResolvedEntity};
pub use user::{Member, User};
