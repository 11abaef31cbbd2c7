//! # cord-service
//!
//! Application layer: target parsing and resolution, mention rewriting in
//! both directions, and the message/listing use cases built on top.

pub mod services;

pub use services::context::ServiceContext;
pub use services::error::{ServiceError, ServiceResult};
pub use services::mention::MentionProcessor;
pub use services::message::MessageService;
pub use services::resolver::Resolver;
pub use services::target::{ScopedQuery, TargetToken};
