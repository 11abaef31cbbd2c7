//! Application services
//!
//! Each service borrows the shared [`context::ServiceContext`] and implements
//! one slice of the use cases: parsing caller-supplied targets, resolving
//! them to ids, rewriting mentions, and the message operations themselves.

pub mod context;
pub mod error;
pub mod mention;
pub mod message;
pub mod resolver;
pub mod target;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use mention::MentionProcessor;
pub use message::MessageService;
pub use resolver::Resolver;
pub use target::{ScopedQuery, TargetToken};
