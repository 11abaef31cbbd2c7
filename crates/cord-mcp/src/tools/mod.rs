//! MCP tool handlers
//!
//! Each tool wraps one message or listing use case. Handlers parse their
//! arguments, run the service call, and render the outcome as text; domain
//! failures come back as readable `ERROR:` text, not protocol errors.

mod listing;
mod messages;

use anyhow::{bail, Result};
use serde_json::Value;

use crate::protocol::{Tool, ToolsListResult};
use crate::server::McpServer;

/// Handle tools/list request - return available tools
pub fn handle_tools_list() -> Result<Value> {
    let tools = vec![
        Tool {
            name: "send_message".into(),
            description: "Send a message to a Discord channel or user. Target accepts a channel name ('general' or '#general'), a scoped name ('ServerName/general'), a username ('@alice' falls back to a DM when no channel matches), or a raw ID. Mentions like @name in the message body are converted automatically.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "target": {
                        "type": "string",
                        "description": "Channel or user to send to: name, 'Server/name', or 17-20 digit ID"
                    },
                    "message": {
                        "type": "string",
                        "description": "Message text to send"
                    }
                },
                "required": ["target", "message"]
            }),
        },
        Tool {
            name: "edit_message".into(),
            description: "Edit a message previously sent by the bot, found by its ID. An empty new_content deletes the message instead.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "message_id": {
                        "type": "string",
                        "description": "ID of the message to edit (17-20 digits)"
                    },
                    "new_content": {
                        "type": "string",
                        "description": "Replacement text; empty or whitespace deletes the message"
                    }
                },
                "required": ["message_id", "new_content"]
            }),
        },
        Tool {
            name: "read_messages".into(),
            description: "Read recent messages from a channel, oldest first, with user mentions shown as @username.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "channel": {
                        "type": "string",
                        "description": "Channel to read: name, 'Server/name', or ID"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Number of messages (default: 50, max: 100)",
                        "default": 50
                    }
                },
                "required": ["channel"]
            }),
        },
        Tool {
            name: "search_messages".into(),
            description: "Search recent channel history for messages containing a phrase (case-insensitive substring match).".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "channel": {
                        "type": "string",
                        "description": "Channel to search: name, 'Server/name', or ID"
                    },
                    "query": {
                        "type": "string",
                        "description": "Text to search for"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "How many recent messages to scan (default: 100, max: 500)",
                        "default": 100
                    }
                },
                "required": ["channel", "query"]
            }),
        },
        Tool {
            name: "list_servers".into(),
            description: "List all Discord servers the bot is connected to, with IDs and member counts.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
        Tool {
            name: "list_channels".into(),
            description: "List the channels of one server.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "server": {
                        "type": "string",
                        "description": "Server name or ID"
                    }
                },
                "required": ["server"]
            }),
        },
        Tool {
            name: "add_reaction".into(),
            description: "Add an emoji reaction to a message, found by its ID.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "message_id": {
                        "type": "string",
                        "description": "ID of the message to react to (17-20 digits)"
                    },
                    "emoji": {
                        "type": "string",
                        "description": "Emoji to add, e.g. 👍 or a custom emoji name:id"
                    }
                },
                "required": ["message_id", "emoji"]
            }),
        },
    ];

    Ok(serde_json::to_value(ToolsListResult { tools })?)
}

/// Handle tools/call request - dispatch to the named tool handler
pub async fn handle_tools_call(server: &McpServer, params: Option<Value>) -> Result<Value> {
    let params = params.ok_or_else(|| anyhow::anyhow!("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing tool name"))?;

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(Value::Object(serde_json::Map::default()));

    let start = std::time::Instant::now();
    tracing::debug!(tool = name, "tool call started");

    let result = match name {
        "send_message" => messages::tool_send_message(server, arguments).await,
        "edit_message" => messages::tool_edit_message(server, arguments).await,
        "read_messages" => messages::tool_read_messages(server, arguments).await,
        "search_messages" => messages::tool_search_messages(server, arguments).await,
        "add_reaction" => messages::tool_add_reaction(server, arguments).await,
        "list_servers" => listing::tool_list_servers(server).await,
        "list_channels" => listing::tool_list_channels(server, arguments).await,
        _ => bail!(
            "Unknown tool: '{name}'. Available tools: send_message, edit_message, \
             read_messages, search_messages, list_servers, list_channels, add_reaction"
        ),
    };

    let elapsed = start.elapsed();
    tracing::info!(
        tool = name,
        elapsed_ms = elapsed.as_millis() as u64,
        ok = result.is_ok(),
        "tool call completed"
    );
    result
}
