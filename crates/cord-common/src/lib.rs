//! # cord-common
//!
//! Shared infrastructure: environment-based configuration and tracing setup.

pub mod config;
pub mod telemetry;

pub use config::{BridgeConfig, ConfigError};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
