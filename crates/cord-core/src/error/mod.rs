//! Error taxonomy for the domain layer

mod gateway_error;
mod resolve_error;

pub use gateway_error::{GatewayError, GatewayResult};
pub use resolve_error::{ResolveError, ResolveResult};
