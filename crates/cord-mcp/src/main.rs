//! cord-mcp entry point
//!
//! Loads configuration from the environment, wires the REST gateway into a
//! service context, and serves MCP over stdio.

use std::sync::Arc;

use anyhow::{Context, Result};

use cord_common::{try_init_tracing, BridgeConfig, TracingConfig};
use cord_discord::{RestConfig, RestGateway};
use cord_mcp::transport::serve_stdio;
use cord_mcp::McpServer;
use cord_service::ServiceContext;

#[tokio::main]
async fn main() -> Result<()> {
    try_init_tracing(TracingConfig::default()).context("failed to initialize tracing")?;

    let config = BridgeConfig::from_env().context("failed to load configuration")?;

    let gateway = RestGateway::new(RestConfig {
        token: config.token,
        api_base_url: config.api_base_url,
        request_timeout_secs: config.request_timeout_secs,
        member_page_size: config.member_page_size,
    })
    .context("failed to build Discord client")?;

    let ctx = ServiceContext::new(Arc::new(gateway));
    let server = McpServer::new(ctx);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cord-mcp serving on stdio");
    serve_stdio(server).await
}
