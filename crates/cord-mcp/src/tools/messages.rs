//! Message tools: send, edit, read, search, react

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use cord_service::MessageService;

use crate::protocol::text_result;
use crate::render;
use crate::server::McpServer;

#[derive(Deserialize)]
struct SendArgs {
    target: String,
    message: String,
}

pub async fn tool_send_message(server: &McpServer, arguments: Value) -> Result<Value> {
    let args: SendArgs = serde_json::from_value(arguments)?;
    let service = MessageService::new(server.ctx());
    let text = match service.send(&args.target, &args.message).await {
        Ok(receipt) => render::render_send(&receipt),
        Err(err) => render::render_service_error(&err),
    };
    Ok(text_result(text))
}

#[derive(Deserialize)]
struct EditArgs {
    message_id: String,
    new_content: String,
}

pub async fn tool_edit_message(server: &McpServer, arguments: Value) -> Result<Value> {
    let args: EditArgs = serde_json::from_value(arguments)?;
    let service = MessageService::new(server.ctx());
    let text = match service
        .edit_or_delete(&args.message_id, &args.new_content)
        .await
    {
        Ok(outcome) => render::render_edit(&outcome),
        Err(err) => render::render_service_error(&err),
    };
    Ok(text_result(text))
}

#[derive(Deserialize)]
struct ReadArgs {
    channel: String,
    limit: Option<u8>,
}

pub async fn tool_read_messages(server: &McpServer, arguments: Value) -> Result<Value> {
    let args: ReadArgs = serde_json::from_value(arguments)?;
    let service = MessageService::new(server.ctx());
    let text = match service.read(&args.channel, args.limit).await {
        Ok(history) => render::render_history(&history),
        Err(err) => render::render_service_error(&err),
    };
    Ok(text_result(text))
}

#[derive(Deserialize)]
struct SearchArgs {
    channel: String,
    query: String,
    limit: Option<u16>,
}

pub async fn tool_search_messages(server: &McpServer, arguments: Value) -> Result<Value> {
    let args: SearchArgs = serde_json::from_value(arguments)?;
    let service = MessageService::new(server.ctx());
    let text = match service.search(&args.channel, &args.query, args.limit).await {
        Ok(results) => render::render_search(&results),
        Err(err) => render::render_service_error(&err),
    };
    Ok(text_result(text))
}

#[derive(Deserialize)]
struct ReactionArgs {
    message_id: String,
    emoji: String,
}

pub async fn tool_add_reaction(server: &McpServer, arguments: Value) -> Result<Value> {
    let args: ReactionArgs = serde_json::from_value(arguments)?;
    let service = MessageService::new(server.ctx());
    let text = match service.react(&args.message_id, &args.emoji).await {
        Ok(receipt) => render::render_reaction(&receipt),
        Err(err) => render::render_service_error(&err),
    };
    Ok(text_result(text))
}
