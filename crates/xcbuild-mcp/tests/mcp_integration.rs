//! Server-level integration tests that exercise dispatch and validation
//! without invoking the Xcode toolchain.

use serde_json::json;
use xcbuild_mcp::ServerError;
use xcbuild_mcp::mcp::server::{McpBuildServer, ToolRequest};

#[test]
fn server_exposes_the_full_tool_set() {
    let server = McpBuildServer::new().expect("server");
    let schemas = server.get_tool_schemas().expect("schemas");

    let names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "boot_simulator",
            "build_project",
            "install_app",
            "launch_app",
            "list_schemes",
            "list_simulators",
            "run_tests",
        ]
    );
}

#[test]
fn every_schema_declares_an_object_with_properties() {
    let server = McpBuildServer::new().expect("server");
    for schema in server.get_tool_schemas().expect("schemas") {
        assert_eq!(schema.parameters["type"], "object", "{}", schema.name);
        assert!(schema.parameters["properties"].is_object(), "{}", schema.name);
        assert!(schema.parameters["required"].is_array(), "{}", schema.name);
    }
}

#[tokio::test]
async fn unregistered_tool_names_are_refused() {
    let server = McpBuildServer::new().expect("server");
    for name in ["shutdown_host", "rm", ""] {
        let result = server
            .call_tool(ToolRequest {
                tool_name: name.to_string(),
                params: json!({}),
            })
            .await;
        assert!(matches!(result, Err(ServerError::Mcp(_))), "{name}");
    }
}

#[tokio::test]
async fn tools_validate_params_before_touching_the_toolchain() {
    let server = McpBuildServer::new().expect("server");

    for (tool, params) in [
        ("build_project", json!({})),
        ("boot_simulator", json!({})),
        ("install_app", json!({ "device_id": "booted" })),
        ("launch_app", json!({ "bundle_id": "com.example.app" })),
        ("install_app", json!({ "device_id": "booted", "app_path": "/tmp/App.zip" })),
    ] {
        let result = server
            .call_tool(ToolRequest {
                tool_name: tool.to_string(),
                params,
            })
            .await;
        assert!(
            matches!(result, Err(ServerError::Validation(_))),
            "{tool} should have failed validation"
        );
    }
}
