//! End-to-end MCP dispatch
//!
//! Run with: cargo test -p integration-tests --test tools

use serde_json::{json, Value};

use cord_core::{Message, Snowflake, User};
use cord_mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use cord_mcp::McpServer;
use integration_tests::fixtures::{two_server_context, ALICE, ALPHA_RANDOM, BOB};
use integration_tests::FakeGateway;

fn request(method: &str, params: Value) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(json!(1)),
        method: method.into(),
        params: Some(params),
    }
}

fn call(name: &str, arguments: Value) -> JsonRpcRequest {
    request("tools/call", json!({ "name": name, "arguments": arguments }))
}

fn tool_text(response: &JsonRpcResponse) -> &str {
    response
        .result
        .as_ref()
        .and_then(|r| r["content"][0]["text"].as_str())
        .expect("tool text result")
}

fn server() -> (McpServer, std::sync::Arc<FakeGateway>) {
    let (ctx, fake) = two_server_context();
    (McpServer::new(ctx), fake)
}

#[tokio::test]
async fn test_initialize_and_tools_list() {
    let (server, _fake) = server();

    let response = server
        .handle_request(request(
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test", "version": "0.1" }
            }),
        ))
        .await;
    assert!(response.error.is_none());

    let response = server.handle_request(request("tools/list", json!({}))).await;
    let tools = &response.result.unwrap()["tools"];
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "send_message",
            "edit_message",
            "read_messages",
            "search_messages",
            "list_servers",
            "list_channels",
            "add_reaction",
        ]
    );
}

#[tokio::test]
async fn test_unknown_method_is_an_error() {
    let (server, _fake) = server();
    let response = server.handle_request(request("resources/list", json!({}))).await;
    assert!(response.error.is_some());
}

#[tokio::test]
async fn test_send_to_channel_text() {
    let (server, fake) = server();
    let response = server
        .handle_request(call(
            "send_message",
            json!({ "target": "Alpha/general", "message": "hello @alice" }),
        ))
        .await;
    let text = tool_text(&response);
    assert!(text.starts_with("Message sent to #general in Alpha (Message ID: "));
    // Mention was rewritten on the way out
    assert!(fake.sent.lock().unwrap()[0].1.contains("<@300000000000000001>"));
}

#[tokio::test]
async fn test_send_falls_back_to_dm() {
    let (server, _fake) = server();
    let response = server
        .handle_request(call(
            "send_message",
            json!({ "target": "@bob", "message": "psst" }),
        ))
        .await;
    assert!(tool_text(&response).starts_with("DM sent to bob (Message ID: "));
}

#[tokio::test]
async fn test_send_ambiguous_is_tool_text_not_rpc_error() {
    let (server, _fake) = server();
    let response = server
        .handle_request(call(
            "send_message",
            json!({ "target": "general", "message": "hello" }),
        ))
        .await;
    assert!(response.error.is_none());
    let text = tool_text(&response);
    assert!(text.starts_with("ERROR: Multiple channels named 'general'"));
    assert!(text.contains("Alpha"));
    assert!(text.contains("Beta"));
    assert!(text.contains("'ServerName/general'"));
}

#[tokio::test]
async fn test_send_unknown_target_reports_both_lookups() {
    let (server, _fake) = server();
    let response = server
        .handle_request(call(
            "send_message",
            json!({ "target": "nowhere", "message": "hello" }),
        ))
        .await;
    let text = tool_text(&response);
    assert!(text.starts_with("ERROR: Could not find channel or user 'nowhere'."));
    assert!(text.contains("Channel lookup failed:"));
    assert!(text.contains("User lookup failed:"));
}

#[tokio::test]
async fn test_edit_blank_deletes() {
    let (server, fake) = server();
    fake.seed_message(
        ALPHA_RANDOM,
        Message::new(
            Snowflake::new(800_000_000_000_000_001),
            ALPHA_RANDOM,
            User::new(ALICE, "alice"),
            "typo",
        ),
    );
    let response = server
        .handle_request(call(
            "edit_message",
            json!({ "message_id": "800000000000000001", "new_content": "  " }),
        ))
        .await;
    assert_eq!(
        tool_text(&response),
        "Message 800000000000000001 deleted successfully from #random"
    );
    assert_eq!(fake.deletions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_edit_bad_id_is_validation_text() {
    let (server, _fake) = server();
    let response = server
        .handle_request(call(
            "edit_message",
            json!({ "message_id": "42", "new_content": "x" }),
        ))
        .await;
    let text = tool_text(&response);
    assert!(text.starts_with("ERROR: "));
    assert!(text.contains("17-20 digit"));
}

#[tokio::test]
async fn test_read_messages_header_and_order() {
    let (server, fake) = server();
    fake.seed_message(
        ALPHA_RANDOM,
        Message::new(
            Snowflake::new(800_000_000_000_000_001),
            ALPHA_RANDOM,
            User::new(ALICE, "alice"),
            "first",
        ),
    );
    fake.seed_message(
        ALPHA_RANDOM,
        Message::new(
            Snowflake::new(800_000_000_000_000_002),
            ALPHA_RANDOM,
            User::new(BOB, "bob"),
            "cc <@300000000000000001>",
        ),
    );
    let response = server
        .handle_request(call("read_messages", json!({ "channel": "random" })))
        .await;
    let text = tool_text(&response);
    assert!(text.starts_with("Channel: #random\n"));
    assert!(text.contains("Server: Alpha"));
    let first = text.find("alice: first").unwrap();
    let second = text.find("bob: cc @alice").unwrap();
    assert!(first < second, "history must be oldest first");
}

#[tokio::test]
async fn test_search_messages_no_match_text() {
    let (server, fake) = server();
    fake.seed_message(
        ALPHA_RANDOM,
        Message::new(
            Snowflake::new(800_000_000_000_000_001),
            ALPHA_RANDOM,
            User::new(ALICE, "alice"),
            "lunch plans",
        ),
    );
    let response = server
        .handle_request(call(
            "search_messages",
            json!({ "channel": "random", "query": "deploy" }),
        ))
        .await;
    let text = tool_text(&response);
    assert!(text.starts_with("No messages matching 'deploy'"));
}

#[tokio::test]
async fn test_list_servers_and_channels() {
    let (server, _fake) = server();

    let response = server.handle_request(call("list_servers", json!({}))).await;
    let text = tool_text(&response);
    assert!(text.starts_with("Connected to 2 servers:"));
    assert!(text.contains("• Alpha"));
    assert!(text.contains("Members: 2"));

    let response = server
        .handle_request(call("list_channels", json!({ "server": "Beta" })))
        .await;
    let text = tool_text(&response);
    assert!(text.starts_with("Channels in Beta:"));
    assert!(text.contains("#general (text) - ID: 210000000000000001"));
}

#[tokio::test]
async fn test_add_reaction_text() {
    let (server, fake) = server();
    fake.seed_message(
        ALPHA_RANDOM,
        Message::new(
            Snowflake::new(800_000_000_000_000_001),
            ALPHA_RANDOM,
            User::new(ALICE, "alice"),
            "shipped",
        ),
    );
    let response = server
        .handle_request(call(
            "add_reaction",
            json!({ "message_id": "800000000000000001", "emoji": "🎉" }),
        ))
        .await;
    assert_eq!(
        tool_text(&response),
        "Added reaction 🎉 to message 800000000000000001 in #random"
    );
    assert_eq!(fake.reactions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_tool_lists_available() {
    let (server, _fake) = server();
    let response = server
        .handle_request(call("fly_to_the_moon", json!({})))
        .await;
    let error = response.error.expect("rpc error");
    assert!(error.message.contains("Unknown tool"));
    assert!(error.message.contains("send_message"));
}
