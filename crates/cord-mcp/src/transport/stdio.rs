//! Stdio transport
//!
//! Reads JSON-RPC requests from stdin line by line and writes responses to
//! stdout. Stdout must carry nothing else; all diagnostics go to stderr via
//! tracing.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::server::McpServer;

/// Run the server over stdin/stdout until stdin closes
pub async fn serve_stdio(server: McpServer) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(err) => {
                let response = JsonRpcResponse::error(None, -32700, format!("Parse error: {err}"));
                write_response(&mut stdout, &response).await?;
                continue;
            }
        };

        let response = server.handle_request(request).await;

        // Notifications get no response
        if response.id.is_none() && matches!(&response.result, Some(value) if value.is_null()) {
            continue;
        }

        write_response(&mut stdout, &response).await?;
    }

    Ok(())
}

async fn write_response(
    stdout: &mut tokio::io::Stdout,
    response: &JsonRpcResponse,
) -> Result<()> {
    let mut payload = serde_json::to_string(response)?;
    payload.push('\n');
    stdout.write_all(payload.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
