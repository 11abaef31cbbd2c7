//! Server transports

pub mod stdio;

pub use stdio::serve_stdio;
