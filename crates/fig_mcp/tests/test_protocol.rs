//! Protocol-level tests: the handshake, tool discovery, and full dispatch of
//! the network-free parse_url tool.

use fig_config::Config;
use fig_mcp::{JsonRpcRequest, McpServer};
use serde_json::{json, Value};

fn server() -> McpServer {
    McpServer::new(&Config::new("test-token")).unwrap()
}

fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(id)),
        method: method.to_string(),
        params,
    }
}

#[tokio::test]
async fn test_initialize_handshake() {
    let resp = server()
        .handle_request(request(1, "initialize", Some(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "0.0.1"}
        }))))
        .await
        .unwrap();

    let result = resp.result.unwrap();
    assert_eq!(result["protocolVersion"], json!(fig_mcp::PROTOCOL_VERSION));
    assert_eq!(result["serverInfo"]["name"], json!("figdeck"));
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_tools_list_declares_every_tool() {
    let resp = server()
        .handle_request(request(2, "tools/list", None))
        .await
        .unwrap();

    let result = resp.result.unwrap();
    let tools = result["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();

    for expected in [
        "get_file",
        "get_file_full",
        "get_node",
        "list_frames",
        "find_frame_by_name",
        "get_frame_full",
        "list_components",
        "get_file_styles",
        "get_file_variables",
        "render_node_image",
        "get_file_comments",
        "get_team_projects",
        "get_project_files",
        "parse_url",
    ] {
        assert!(names.contains(&expected), "missing tool {}", expected);
    }
}

#[tokio::test]
async fn test_tool_call_parse_url_round_trip() {
    let resp = server()
        .handle_request(request(3, "tools/call", Some(json!({
            "name": "parse_url",
            "arguments": {
                "url": "https://www.figma.com/file/Key42/Demo?node-id=10-20"
            }
        }))))
        .await
        .unwrap();

    let result = resp.result.unwrap();
    let text = result["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();

    assert_eq!(payload["fileKey"], json!("Key42"));
    assert_eq!(payload["nodeId"], json!("10:20"));
    assert_eq!(
        payload["url"],
        json!("https://www.figma.com/file/Key42/Demo?node-id=10-20")
    );
}

#[tokio::test]
async fn test_tool_call_parse_url_invalid_reference() {
    let resp = server()
        .handle_request(request(4, "tools/call", Some(json!({
            "name": "parse_url",
            "arguments": { "url": "https://example.com/not-figma" }
        }))))
        .await
        .unwrap();

    // Unrecognized locators are payload errors the agent can act on,
    // not protocol failures
    let result = resp.result.unwrap();
    let text = result["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("Invalid Figma URL"));
}

#[tokio::test]
async fn test_tool_call_unknown_tool() {
    let resp = server()
        .handle_request(request(5, "tools/call", Some(json!({
            "name": "does_not_exist",
            "arguments": {}
        }))))
        .await
        .unwrap();

    let error = resp.error.unwrap();
    assert_eq!(error.code, -32602);
    assert!(error.message.contains("Unknown tool"));
}

#[tokio::test]
async fn test_tool_call_missing_arguments() {
    let resp = server()
        .handle_request(request(6, "tools/call", Some(json!({
            "name": "parse_url"
        }))))
        .await
        .unwrap();

    let error = resp.error.unwrap();
    assert_eq!(error.code, -32602);
}
