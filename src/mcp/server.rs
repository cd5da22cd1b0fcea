//! MCP JSON-RPC protocol handler over stdio.
//!
//! Reads JSON-RPC requests from stdin, routes tool calls through the
//! [`Dispatcher`], and sends JSON-RPC responses to stdout. Implements the MCP
//! protocol methods: `initialize`, `notifications/initialized`, `ping`,
//! `tools/list`, `tools/call`.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use super::dispatch::Dispatcher;
use super::error::{ToolError, INTERNAL_ERROR};
use super::tools::{ToolDescriptor, ToolRegistry};
use super::handlers::McpToolResult;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

// ---------------------------------------------------------------------------
// JSON-RPC message types
// ---------------------------------------------------------------------------

/// Incoming JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// Outgoing JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tool server
// ---------------------------------------------------------------------------

/// Name and version reported during `initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// One MCP server: its identity, the tools it advertises, and their handlers.
pub struct ToolServer {
    info: ServerInfo,
    registry: ToolRegistry,
    dispatcher: Dispatcher,
}

impl ToolServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            dispatcher: Dispatcher::new(name.clone()),
            info: ServerInfo {
                name,
                version: version.into(),
            },
            registry: ToolRegistry::new(),
        }
    }

    /// Advertise `descriptor` and route calls for its name to `handler`.
    pub fn register<F, Fut>(&mut self, descriptor: ToolDescriptor, handler: F) -> Result<(), ToolError>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpToolResult> + Send + 'static,
    {
        self.dispatcher.register(&descriptor.name, handler)?;
        self.registry.register(descriptor)
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn list_tools(&self) -> &[ToolDescriptor] {
        self.registry.list_tools()
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult, ToolError> {
        self.dispatcher.call_tool(name, arguments).await
    }
}

// ---------------------------------------------------------------------------
// Transport loop
// ---------------------------------------------------------------------------

/// Run `server` on stdin/stdout until stdin closes.
///
/// Diagnostic logs go to stderr; stdout carries nothing but JSON-RPC.
pub async fn run_server(server: ToolServer) -> Result<(), Box<dyn std::error::Error>> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();

    info!(
        "[{}] Starting MCP server v{} ({} tools)",
        server.info.name,
        server.info.version,
        server.list_tools().len()
    );

    serve(&server, reader, &mut writer).await?;

    info!("[{}] stdin closed, shutting down", server.info.name);
    Ok(())
}

/// Serve newline-delimited JSON-RPC from `reader`, writing responses to `writer`.
///
/// Requests are handled strictly one at a time.
pub async fn serve<R, W>(server: &ToolServer, reader: R, writer: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                let resp = JsonRpcResponse::error(
                    Value::Null,
                    -32700, // Parse error
                    format!("Invalid JSON: {}", e),
                );
                write_response(writer, &resp).await;
                continue;
            }
        };

        if request.jsonrpc != "2.0" {
            if let Some(id) = request.id {
                let resp = JsonRpcResponse::error(id, -32600, "Invalid JSON-RPC version");
                write_response(writer, &resp).await;
            }
            continue;
        }

        let response = handle_request(server, &request).await;

        // Notifications (no id) don't get a response
        if request.id.is_none() {
            continue;
        }
        if let Some(resp) = response {
            write_response(writer, &resp).await;
        }
    }

    Ok(())
}

/// Handle a single JSON-RPC request and return a response.
async fn handle_request(server: &ToolServer, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    let id = request.id.clone().unwrap_or(Value::Null);

    match request.method.as_str() {
        "initialize" => Some(handle_initialize(id, &server.info)),
        "notifications/initialized" | "initialized" => {
            info!("[{}] Client sent 'initialized' notification", server.info.name);
            None
        }
        "ping" => Some(JsonRpcResponse::success(id, json!({}))),
        "tools/list" => Some(handle_tools_list(id, server)),
        "tools/call" => Some(handle_tools_call(server, id, &request.params).await),
        "notifications/cancelled" => {
            // Calls run to completion; nothing to cancel.
            debug!("[{}] Request cancelled: {:?}", server.info.name, request.params);
            None
        }
        _ => Some(JsonRpcResponse::error(
            id,
            -32601, // Method not found
            format!("Unknown method: {}", request.method),
        )),
    }
}

/// Handle `initialize` -- return server capabilities.
fn handle_initialize(id: Value, info: &ServerInfo) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": info,
        }),
    )
}

/// Handle `tools/list` -- return every registered tool definition.
fn handle_tools_list(id: Value, server: &ToolServer) -> JsonRpcResponse {
    JsonRpcResponse::success(id, json!({ "tools": server.list_tools() }))
}

/// Handle `tools/call` -- dispatch to the registered handler.
async fn handle_tools_call(server: &ToolServer, id: Value, params: &Value) -> JsonRpcResponse {
    let tool_name = params
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if tool_name.is_empty() {
        let e = ToolError::MissingToolName;
        return JsonRpcResponse::error(id, e.code(), e.to_string());
    }
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match server.call_tool(tool_name, args).await {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                error!("[{}] Failed to serialize tool result: {}", server.info.name, e);
                JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Failed to serialize result: {}", e))
            }
        },
        Err(e) => {
            warn!("[{}] {}", server.info.name, e);
            JsonRpcResponse::error(id, e.code(), e.to_string())
        }
    }
}

/// Write a JSON-RPC response (one line).
async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            let line = format!("{}\n", json);
            if let Err(e) = writer.write_all(line.as_bytes()).await {
                error!("[MCP] Failed to write response: {}", e);
            }
            if let Err(e) = writer.flush().await {
                error!("[MCP] Failed to flush stdout: {}", e);
            }
        }
        Err(e) => {
            error!("[MCP] Failed to serialize response: {}", e);
        }
    }
}
