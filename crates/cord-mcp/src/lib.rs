//! # cord-mcp
//!
//! The MCP (Model Context Protocol) surface: JSON-RPC types, the request
//! dispatcher, the tool handlers, and the stdio transport. All logging goes
//! to stderr; stdout carries nothing but JSON-RPC responses.

pub mod protocol;
pub mod render;
pub mod server;
pub mod tools;
pub mod transport;

pub use server::McpServer;
