//! Integration test utilities
//!
//! An in-memory chat gateway and canned fixtures for exercising the
//! resolution, mention, and tool layers end to end without network access.


pub use fake_gateway::FakeGateway;
