//! MCP server binary
//!
//! JSON-RPC 2.0 over line-delimited stdin/stdout. Configuration comes from
//! the environment once at startup; a server without a Figma token can serve
//! nothing, so a missing token is fatal here rather than per request.

use fig_common::EXIT_CONFIG_ERROR;
use fig_config::Config;
use fig_mcp::{JsonRpcRequest, McpServer};
use std::io::{self, BufRead, Write};
use tokio::runtime::Runtime;

fn main() {
    // Tracing to stderr only; stdout is reserved for JSON-RPC
    fig_common::telemetry::init_tracing(false, false);

    tracing::info!("FigDeck MCP server starting");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let server = match McpServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to build Figma client: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    // One runtime for the async client calls; requests are served one at a time
    let rt = Runtime::new().expect("Failed to create Tokio runtime");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("Error reading stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        tracing::debug!("Received: {}", line);

        let reply = match serde_json::from_str::<JsonRpcRequest>(&line) {
            // Notifications produce no reply at all
            Ok(request) => rt
                .block_on(server.handle_request(request))
                .map(|resp| serde_json::to_string(&resp))
                .transpose()
                .unwrap_or_else(|e| {
                    tracing::error!("Failed to serialize response: {}", e);
                    None
                }),
            Err(e) => {
                tracing::error!("Failed to parse request: {}", e);
                Some(parse_error(&e).to_string())
            }
        };

        if let Some(reply) = reply {
            tracing::debug!("Sending: {}", reply);
            if let Err(e) = write_line(&mut stdout, &reply) {
                tracing::error!("Failed to write response: {}", e);
                break;
            }
        }
    }

    tracing::info!("FigDeck MCP server shutting down");
}

fn parse_error(e: &serde_json::Error) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": {
            "code": -32700,
            "message": format!("Parse error: {}", e)
        }
    })
}

/// One response per line, flushed immediately so the client never waits
fn write_line(out: &mut impl Write, line: &str) -> io::Result<()> {
    writeln!(out, "{}", line)?;
    out.flush()
}
