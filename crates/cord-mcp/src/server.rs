//! MCP server core
//!
//! Holds the service context and routes JSON-RPC methods. Tool failures
//! that a model can act on (bad targets, ambiguity, missing messages) are
//! rendered as tool text; only protocol-level problems become JSON-RPC
//! errors.

use anyhow::{anyhow, Result};
use serde_json::Value;

use cord_service::ServiceContext;

use crate::protocol::{
    ClientInfo, InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse,
    ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::tools;

/// MCP protocol version
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server
pub struct McpServer {
    ctx: ServiceContext,
}

impl McpServer {
    /// Create a server over a service context
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// The service context (tool handlers borrow it)
    pub(crate) fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Handle a JSON-RPC request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            // Notification, no response needed
            "initialized" | "notifications/initialized" => Ok(Value::Null),
            "tools/list" => tools::handle_tools_list(),
            "tools/call" => tools::handle_tools_call(self, request.params).await,
            other => Err(anyhow!("Unknown method: {other}")),
        };

        match result {
            Ok(value) => JsonRpcResponse::ok(request.id, value),
            Err(err) => {
                tracing::debug!(error = %err, "request error");
                JsonRpcResponse::error(request.id, -32000, err.to_string())
            }
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value> {
        let _params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or(InitializeParams {
                protocol_version: MCP_PROTOCOL_VERSION.into(),
                capabilities: Value::Object(serde_json::Map::default()),
                client_info: ClientInfo {
                    name: "unknown".into(),
                    version: "0.0.0".into(),
                },
            });

        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.into(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "cord-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
        };

        Ok(serde_json::to_value(result)?)
    }
}
