//! Listing tools: servers and channels

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use cord_service::MessageService;

use crate::protocol::text_result;
use crate::render;
use crate::server::McpServer;

pub async fn tool_list_servers(server: &McpServer) -> Result<Value> {
    let service = MessageService::new(server.ctx());
    let text = match service.list_servers().await {
        Ok(guilds) => render::render_servers(&guilds),
        Err(err) => render::render_service_error(&err),
    };
    Ok(text_result(text))
}

#[derive(Deserialize)]
struct ListChannelsArgs {
    server: String,
}

pub async fn tool_list_channels(server: &McpServer, arguments: Value) -> Result<Value> {
    let args: ListChannelsArgs = serde_json::from_value(arguments)?;
    let service = MessageService::new(server.ctx());
    let text = match service.list_channels(&args.server).await {
        Ok((resolved, channels)) => render::render_channels(&resolved, &channels),
        Err(err) => render::render_service_error(&err),
    };
    Ok(text_result(text))
}
