use serde_json::{Value, json};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use xcbuild_mcp::Result;
use xcbuild_mcp::mcp::error_codes::ErrorCode;
use xcbuild_mcp::mcp::server::{McpBuildServer, ToolRequest};

#[derive(serde::Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

#[derive(serde::Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl JsonRpcResponse {
    fn result(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: ErrorCode, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(json!({ "code": code, "message": message })),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    eprintln!("Starting xcbuild MCP server...");

    let server = McpBuildServer::new()?;
    let schemas = server.get_tool_schemas()?;
    eprintln!("Available tools: {}", schemas.len());
    for schema in &schemas {
        eprintln!("  - {}: {}", schema.name, schema.description);
    }

    eprintln!("\nMCP server ready. Listening for JSON-RPC requests on stdin...");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                let response =
                    JsonRpcResponse::error(None, ErrorCode::PARSE_ERROR, format!("Parse error: {e}"));
                writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                stdout.flush()?;
                continue;
            }
        };

        // Notifications carry no id and expect no response.
        if request.method.starts_with("notifications/") {
            continue;
        }

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::result(
                request.id,
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": "xcbuild-mcp",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ),
            "tools/list" => JsonRpcResponse::result(
                request.id,
                json!({
                    "tools": schemas.iter().map(|s| json!({
                        "name": s.name,
                        "description": s.description,
                        "inputSchema": s.parameters
                    })).collect::<Vec<_>>()
                }),
            ),
            "tools/call" => handle_tool_call(&server, request.id, request.params).await?,
            _ => JsonRpcResponse::error(
                request.id,
                ErrorCode::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    Ok(())
}

async fn handle_tool_call(
    server: &McpBuildServer,
    id: Option<Value>,
    params: Option<Value>,
) -> Result<JsonRpcResponse> {
    let Some(params) = params else {
        return Ok(JsonRpcResponse::error(
            id,
            ErrorCode::INVALID_PARAMS,
            "Invalid params: params required".to_string(),
        ));
    };

    let (Some(name), Some(arguments)) = (
        params.get("name").and_then(|v| v.as_str()),
        params.get("arguments"),
    ) else {
        return Ok(JsonRpcResponse::error(
            id,
            ErrorCode::INVALID_PARAMS,
            "Invalid params: missing 'name' or 'arguments'".to_string(),
        ));
    };

    let tool_request = ToolRequest {
        tool_name: name.to_string(),
        params: arguments.clone(),
    };

    match server.call_tool(tool_request).await {
        Ok(tool_response) => {
            // Tools render a human-readable message; fall back to the full
            // result JSON when one is absent.
            let text = match tool_response.result.get("message").and_then(|v| v.as_str()) {
                Some(message) => message.to_string(),
                None => serde_json::to_string_pretty(&tool_response.result)?,
            };
            Ok(JsonRpcResponse::result(
                id,
                json!({
                    "content": [{ "type": "text", "text": text }],
                    "structuredContent": tool_response.result
                }),
            ))
        }
        Err(e) => Ok(JsonRpcResponse::error(
            id,
            ErrorCode::INTERNAL_ERROR,
            format!("Tool execution error: {e}"),
        )),
    }
}
