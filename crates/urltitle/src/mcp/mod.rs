mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

const JSONRPC_VERSION: &str = "2.0";

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Option<serde_json::Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(global).await,
        cli::Commands::Sse(options) => sse::run_sse(options, global).await,
    }
}

/// Handle one JSON-RPC message
///
/// Returns `None` for notifications, which get no response.
pub async fn handle_request(request_str: &str, global: &crate::Global) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            log::warn!("rejecting malformed request: {e}");
            return Some(JsonRpcResponse::failure(
                None,
                JsonRpcError {
                    code: -32700,
                    message: format!("Parse error: {e}"),
                    data: None,
                },
            ));
        }
    };

    log::debug!("handling {}", request.method);

    if request.method.starts_with("notifications/") {
        return None;
    }

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, global).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    Some(match result {
        Ok(value) => JsonRpcResponse::success(request.id, value),
        Err(error) => JsonRpcResponse::failure(request.id, error),
    })
}
