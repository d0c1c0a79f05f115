use crate::{Result, ServerError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::timeout;

use super::build_tools::{BuildProjectKit, ListSchemesKit};
use super::simulator_tools::{BootSimulatorKit, InstallAppKit, LaunchAppKit, ListSimulatorsKit};
use super::test_run_tools::RunTestsKit;

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolRequest {
    pub tool_name: String,
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolResponse {
    pub tool_name: String,
    pub result: Value,
    pub success: bool,
}

pub struct McpBuildServer {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl std::fmt::Debug for McpBuildServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpBuildServer")
            .field("tools", &"<tools>")
            .finish()
    }
}

impl McpBuildServer {
    pub fn new() -> Result<Self> {
        let mut tools: HashMap<String, Arc<dyn Tool>> = HashMap::new();

        tools.insert("build_project".to_string(), Arc::new(BuildProjectKit::new()));
        tools.insert("list_schemes".to_string(), Arc::new(ListSchemesKit::new()));
        tools.insert("run_tests".to_string(), Arc::new(RunTestsKit::new()));

        // Simulator lifecycle tools
        tools.insert("list_simulators".to_string(), Arc::new(ListSimulatorsKit::new()));
        tools.insert("boot_simulator".to_string(), Arc::new(BootSimulatorKit::new()));
        tools.insert("install_app".to_string(), Arc::new(InstallAppKit::new()));
        tools.insert("launch_app".to_string(), Arc::new(LaunchAppKit::new()));

        Ok(Self {
            tools: Arc::new(RwLock::new(tools)),
        })
    }

    pub fn register_tool(&self, name: String, tool: Arc<dyn Tool>) -> Result<()> {
        let mut tools = self
            .tools
            .write()
            .map_err(|e| ServerError::Mcp(format!("Failed to acquire tool lock: {e}")))?;
        tools.insert(name, tool);
        Ok(())
    }

    pub fn get_tool_schemas(&self) -> Result<Vec<ToolSchema>> {
        let tools = self
            .tools
            .read()
            .map_err(|e| ServerError::Mcp(format!("Failed to acquire tool lock: {e}")))?;
        let mut schemas: Vec<ToolSchema> = tools.values().map(|tool| tool.schema().clone()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(schemas)
    }

    pub async fn call_tool(&self, request: ToolRequest) -> Result<ToolResponse> {
        if !self.is_allowed(&request.tool_name, &request.params) {
            return Err(ServerError::Mcp(format!(
                "Tool not allowed: {}",
                request.tool_name
            )));
        }

        // Full xcodebuild invocations routinely run for minutes.
        let result = timeout(
            Duration::from_secs(600),
            self.execute_tool(&request.tool_name, request.params),
        )
        .await
        .map_err(|_| ServerError::Mcp("Tool execution timeout".to_string()))??;

        Ok(ToolResponse {
            result,
            tool_name: request.tool_name,
            success: true,
        })
    }

    fn is_allowed(&self, tool_name: &str, _params: &Value) -> bool {
        matches!(
            tool_name,
            "build_project"
                | "list_schemes"
                | "run_tests"
                | "list_simulators"
                | "boot_simulator"
                | "install_app"
                | "launch_app"
        )
    }

    async fn execute_tool(&self, tool_name: &str, params: Value) -> Result<Value> {
        let tool = {
            let tools = self
                .tools
                .read()
                .map_err(|e| ServerError::Mcp(format!("Failed to acquire tool lock: {e}")))?;

            tools
                .get(tool_name)
                .ok_or_else(|| ServerError::Mcp(format!("Tool not found: {tool_name}")))?
                .clone()
        };

        tool.execute(params).await
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    async fn execute(&self, params: Value) -> Result<Value>;
    fn schema(&self) -> &ToolSchema;
}

#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_tool_is_rejected_by_allow_list() {
        let server = McpBuildServer::new().expect("server");
        let result = server
            .call_tool(ToolRequest {
                tool_name: "erase_disk".to_string(),
                params: serde_json::json!({}),
            })
            .await;
        assert!(matches!(result, Err(ServerError::Mcp(_))));
    }

    #[test]
    fn all_registered_tools_are_allowed_and_schemed() {
        let server = McpBuildServer::new().expect("server");
        let schemas = server.get_tool_schemas().expect("schemas");
        assert_eq!(schemas.len(), 7);
        for schema in &schemas {
            assert!(server.is_allowed(&schema.name, &serde_json::json!({})));
            assert!(!schema.description.is_empty());
            assert_eq!(schema.parameters["type"], "object");
        }
    }

    #[tokio::test]
    async fn missing_required_params_surface_as_validation_errors() {
        let server = McpBuildServer::new().expect("server");
        let result = server
            .call_tool(ToolRequest {
                tool_name: "build_project".to_string(),
                params: serde_json::json!({}),
            })
            .await;
        assert!(matches!(result, Err(ServerError::Validation(_))));
    }
}
