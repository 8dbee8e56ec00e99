//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC 2.0 dispatch for the Figma tool surface.
//!
//! CRITICAL: stdout is reserved EXCLUSIVELY for JSON-RPC responses.
//! All logs (Info/Warn/Error) MUST go to stderr to avoid protocol corruption.

pub mod tools;

use fig_client::FigmaClient;
use fig_common::{FigError, Result};
use fig_config::Config;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Option<Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Convert FigError to JSON-RPC error
    pub fn from_fig_error(err: &FigError) -> Self {
        let code = match err {
            FigError::InvalidLocator(_) => 1001,
            FigError::FetchFailed(_) => 1002,
            FigError::MalformedNode(_) => 1003,
            FigError::CycleDetected => 1004,
            FigError::DepthLimitExceeded { .. } => 1005,
            FigError::ValidationError(_) => -32602, // Invalid params
            _ => -32603, // Internal error
        };

        let data = match err {
            FigError::DepthLimitExceeded { limit } => Some(json!({ "limit": limit })),
            _ => None,
        };

        Self {
            code,
            message: err.to_string(),
            data,
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Unknown method: {}", method),
            data: None,
        }
    }
}

/// The MCP server: owns the Figma client built from explicit configuration
pub struct McpServer {
    client: FigmaClient,
}

impl McpServer {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: FigmaClient::new(config)?,
        })
    }

    /// Handle a single JSON-RPC request
    ///
    /// Notifications (requests without an id) produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::info!(target: "mcp", method = %request.method, "Handling MCP request");

        if request.method.starts_with("notifications/") {
            return None;
        }

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::tool_descriptors() })),
            "tools/call" => self.handle_tool_call(request.params).await,
            _ => {
                request.id.as_ref()?;
                return Some(JsonRpcResponse::failure(
                    request.id,
                    JsonRpcError::method_not_found(&request.method),
                ));
            }
        };

        // A request without an id is a notification even when we computed
        // a result; it must not be answered.
        request.id.as_ref()?;

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => {
                tracing::warn!(target: "mcp", error = %e, "Request failed");
                JsonRpcResponse::failure(request.id, JsonRpcError::from_fig_error(&e))
            }
        })
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": "figdeck",
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {
                "tools": {}
            },
            "instructions": "Tools for querying Figma design files: fetch \
                file trees, find nodes by name or id, list frames and \
                components, extract styles, and render node images. Most \
                tools accept either a Figma file URL or a bare file key.",
        })
    }

    async fn handle_tool_call(&self, params: Option<Value>) -> Result<Value> {
        #[derive(Deserialize)]
        struct ToolCallParams {
            name: String,
            #[serde(default)]
            arguments: Value,
        }

        let params: ToolCallParams = params
            .ok_or_else(|| FigError::ValidationError("Missing params".to_string()))
            .and_then(|v| {
                serde_json::from_value(v)
                    .map_err(|e| FigError::ValidationError(format!("Invalid params: {}", e)))
            })?;

        let result = tools::call_tool(&self.client, &params.name, params.arguments).await?;

        // Tool results travel as pretty-printed JSON text content
        let text = serde_json::to_string_pretty(&result)?;
        Ok(json!({
            "content": [{ "type": "text", "text": text }]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        McpServer::new(&Config::new("test-token")).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let req = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: "ping".to_string(),
            params: None,
        };

        let resp = server().handle_request(req).await.unwrap();
        assert_eq!(resp.result.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let req = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };

        assert!(server().handle_request(req).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let req = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(2)),
            method: "resources/list".to_string(),
            params: None,
        };

        let resp = server().handle_request(req).await.unwrap();
        assert_eq!(resp.error.unwrap().code, -32601);
    }
}
