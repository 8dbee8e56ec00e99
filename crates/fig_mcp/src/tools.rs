//! Figma tool handlers
//!
//! Each tool deserializes its own params struct, drives the client and the
//! core engine, and returns a plain JSON value. Lookup misses come back as
//! payload errors with correction hints, not JSON-RPC errors, so agents can
//! branch on them.

use fig_client::{FigmaClient, ImageFormat};
use fig_common::{FigError, Result};
use fig_core::{
    all_components, extract_file_key, extract_styles, find_by_name, frame_name_suggestions,
    parse_locator, summarize_node, top_level_frames, Node, NAME_SUGGESTION_LIMIT,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Tool descriptors for `tools/list`
pub fn tool_descriptors() -> Value {
    json!([
        {
            "name": "get_file",
            "description": "Fetch a Figma file's document tree and metadata as a bounded summary",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" },
                    "depth": { "type": "integer", "description": "Optional depth limit for document tree traversal" }
                },
                "required": ["file"]
            }
        },
        {
            "name": "get_file_full",
            "description": "Fetch a Figma file's complete document tree (full data, not summarized)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" },
                    "depth": { "type": "integer", "description": "Optional depth limit for document tree traversal" }
                },
                "required": ["file"]
            }
        },
        {
            "name": "get_node",
            "description": "Fetch a specific node by id from a Figma file",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" },
                    "node_id": { "type": "string", "description": "Node id to fetch, e.g. \"1:2\" or \"1-2\"" }
                },
                "required": ["file", "node_id"]
            }
        },
        {
            "name": "list_frames",
            "description": "List all top-level frames and components in a Figma file",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" }
                },
                "required": ["file"]
            }
        },
        {
            "name": "find_frame_by_name",
            "description": "Find a frame or component by name (case-insensitive) with summary and styles",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" },
                    "name": { "type": "string", "description": "Name of the frame/component to find" }
                },
                "required": ["file", "name"]
            }
        },
        {
            "name": "get_frame_full",
            "description": "Get complete data for a frame by name (for code generation)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" },
                    "name": { "type": "string", "description": "Name of the frame/component to find" }
                },
                "required": ["file", "name"]
            }
        },
        {
            "name": "list_components",
            "description": "List all components, component sets, and instances in a Figma file",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" }
                },
                "required": ["file"]
            }
        },
        {
            "name": "get_file_styles",
            "description": "Get published styles from a Figma file (text, fill, effect, grid)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" }
                },
                "required": ["file"]
            }
        },
        {
            "name": "get_file_variables",
            "description": "Get design variables from a Figma file (Enterprise feature)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" }
                },
                "required": ["file"]
            }
        },
        {
            "name": "render_node_image",
            "description": "Render a node as an image and get the download URL",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" },
                    "node_id": { "type": "string", "description": "Node id to render, e.g. \"1:2\" or \"1-2\"" },
                    "format": { "type": "string", "enum": ["png", "jpg", "svg", "pdf"], "description": "Image format (default png)" },
                    "scale": { "type": "number", "description": "Scale factor from 0.01 to 4 (default 1)" }
                },
                "required": ["file", "node_id"]
            }
        },
        {
            "name": "get_file_comments",
            "description": "Get all comments from a Figma file",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "file": { "type": "string", "description": "Figma file URL or file key" }
                },
                "required": ["file"]
            }
        },
        {
            "name": "get_team_projects",
            "description": "List all projects in a Figma team",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "team_id": { "type": "string", "description": "The Figma team id" }
                },
                "required": ["team_id"]
            }
        },
        {
            "name": "get_project_files",
            "description": "List all files in a Figma project",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "project_id": { "type": "string", "description": "The Figma project id" }
                },
                "required": ["project_id"]
            }
        },
        {
            "name": "parse_url",
            "description": "Parse a Figma URL to extract the file key and node id",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "Figma URL to parse" }
                },
                "required": ["url"]
            }
        }
    ])
}

/// Dispatch a tool call by name
pub async fn call_tool(client: &FigmaClient, name: &str, arguments: Value) -> Result<Value> {
    match name {
        "get_file" => get_file(client, arguments).await,
        "get_file_full" => get_file_full(client, arguments).await,
        "get_node" => get_node(client, arguments).await,
        "list_frames" => list_frames(client, arguments).await,
        "find_frame_by_name" => find_frame_by_name(client, arguments).await,
        "get_frame_full" => get_frame_full(client, arguments).await,
        "list_components" => list_components(client, arguments).await,
        "get_file_styles" => get_file_styles(client, arguments).await,
        "get_file_variables" => get_file_variables(client, arguments).await,
        "render_node_image" => render_node_image(client, arguments).await,
        "get_file_comments" => get_file_comments(client, arguments).await,
        "get_team_projects" => get_team_projects(client, arguments).await,
        "get_project_files" => get_project_files(client, arguments).await,
        "parse_url" => parse_url(arguments),
        _ => Err(FigError::ValidationError(format!("Unknown tool: {}", name))),
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| FigError::ValidationError(format!("Invalid arguments: {}", e)))
}

/// The document subtree of a file response, tolerating its absence
fn document_node(response: &Value) -> Result<Node> {
    let raw = response.get("document").cloned().unwrap_or_else(|| json!({}));
    Node::from_value(raw)
}

fn object_len(response: &Value, key: &str) -> usize {
    response
        .get(key)
        .and_then(Value::as_object)
        .map_or(0, |m| m.len())
}

async fn get_file(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
        depth: Option<u32>,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    let response = client.get_file(&file_key, params.depth, None).await?;

    let document = document_node(&response)?;
    Ok(json!({
        "name": response.get("name"),
        "lastModified": response.get("lastModified"),
        "version": response.get("version"),
        "document": summarize_node(&document, true),
        "componentCount": object_len(&response, "components"),
        "styleCount": object_len(&response, "styles"),
    }))
}

async fn get_file_full(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
        depth: Option<u32>,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    client.get_file(&file_key, params.depth, None).await
}

async fn get_node(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
        node_id: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    let normalized_id = params.node_id.replace('-', ":");
    let response = client
        .get_file_nodes(&file_key, &[normalized_id.clone()])
        .await?;

    let node_data = response
        .get("nodes")
        .and_then(|nodes| nodes.get(&normalized_id))
        .filter(|v| !v.is_null());

    let Some(node_data) = node_data else {
        return Ok(json!({ "error": format!("Node {} not found", params.node_id) }));
    };

    let document =
        Node::from_value(node_data.get("document").cloned().unwrap_or_else(|| json!({})))?;
    Ok(json!({ "node": summarize_node(&document, true) }))
}

async fn list_frames(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    // Depth 2 is exactly the levels the top-level scan inspects
    let response = client.get_file(&file_key, Some(2), None).await?;

    let document = document_node(&response)?;
    let frames = top_level_frames(&document);
    Ok(json!({
        "fileName": response.get("name"),
        "frameCount": frames.len(),
        "frames": frames,
    }))
}

async fn find_frame_by_name(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
        name: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    let response = client.get_file(&file_key, None, None).await?;
    let document = document_node(&response)?;

    let Some(node) = find_by_name(&document, &params.name)? else {
        let available = frame_name_suggestions(&document, NAME_SUGGESTION_LIMIT);
        return Ok(json!({
            "error": format!("Frame '{}' not found", params.name),
            "availableFrames": available,
            "hint": "Try one of the available frame names listed above",
        }));
    };

    Ok(json!({
        "found": true,
        "node": summarize_node(node, true),
        "styles": extract_styles(node),
    }))
}

async fn get_frame_full(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
        name: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    let response = client.get_file(&file_key, None, None).await?;
    let document = document_node(&response)?;

    let Some(node) = find_by_name(&document, &params.name)? else {
        return Ok(json!({ "error": format!("Frame '{}' not found", params.name) }));
    };

    serde_json::to_value(node).map_err(FigError::JsonError)
}

async fn list_components(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    let response = client.get_file(&file_key, None, None).await?;

    let document = document_node(&response)?;
    let components = all_components(&document)?;
    Ok(json!({
        "fileName": response.get("name"),
        "componentCount": components.len(),
        "components": components,
    }))
}

async fn get_file_styles(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    client.get_file_styles(&file_key).await
}

async fn get_file_variables(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    client.get_local_variables(&file_key).await
}

async fn render_node_image(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
        node_id: String,
        format: Option<String>,
        scale: Option<f64>,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    let format: ImageFormat = params.format.as_deref().unwrap_or("png").parse()?;
    let normalized_id = params.node_id.replace('-', ":");

    let response = client
        .get_images(&file_key, &[normalized_id.clone()], format, params.scale)
        .await?;

    let image_url = response
        .get("images")
        .and_then(|images| images.get(&normalized_id))
        .and_then(Value::as_str);

    let Some(image_url) = image_url else {
        return Ok(json!({
            "error": format!("Failed to render node {}", params.node_id),
            "details": response.get("err"),
        }));
    };

    Ok(json!({
        "nodeId": params.node_id,
        "format": format.as_str(),
        "imageUrl": image_url,
    }))
}

async fn get_file_comments(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        file: String,
    }

    let params: Params = parse_args(arguments)?;
    let file_key = extract_file_key(&params.file)?;
    client.get_comments(&file_key).await
}

async fn get_team_projects(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        team_id: String,
    }

    let params: Params = parse_args(arguments)?;
    client.get_team_projects(&params.team_id).await
}

async fn get_project_files(client: &FigmaClient, arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        project_id: String,
    }

    let params: Params = parse_args(arguments)?;
    client.get_project_files(&params.project_id).await
}

/// Pure locator parse; needs no client
fn parse_url(arguments: Value) -> Result<Value> {
    #[derive(Deserialize)]
    struct Params {
        url: String,
    }

    let params: Params = parse_args(arguments)?;
    match parse_locator(&params.url) {
        Ok(locator) => Ok(json!({
            "fileKey": locator.file_key,
            "nodeId": locator.node_id,
            "url": params.url,
        })),
        // An unrecognized reference is recoverable: report it in the payload
        // so the caller can correct the input
        Err(FigError::InvalidLocator(message)) => Ok(json!({ "error": message })),
        Err(e) => Err(e),
    }
}
