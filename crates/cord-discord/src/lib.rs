//! # cord-discord
//!
//! Infrastructure layer: the Discord REST implementation of the
//! [`cord_core::ChatGateway`] port.

pub mod config;
pub mod models;
pub mod rest;

pub use config::RestConfig;
pub use rest::RestGateway;
