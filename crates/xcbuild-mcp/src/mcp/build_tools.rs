use super::server::{Tool, ToolSchema};
use crate::execution::CommandExecutor;
use crate::presentation;
use crate::{Result, ServerError};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use xcbuild_output::{classify_build_errors, extract_platform_tokens, parse_compile_output};

/// Builds a scheme with `xcodebuild build` and reports the classified
/// outcome.
pub struct BuildProjectKit {
    schema: ToolSchema,
    executor: CommandExecutor,
}

impl BuildProjectKit {
    pub fn new() -> Self {
        Self {
            schema: ToolSchema {
                name: "build_project".to_string(),
                description: "Build an Xcode project or workspace scheme".to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "scheme": {
                            "type": "string",
                            "description": "Scheme to build"
                        },
                        "project_path": {
                            "type": "string",
                            "description": "Path to a .xcodeproj or .xcworkspace; defaults to the only one in the working directory"
                        },
                        "configuration": {
                            "type": "string",
                            "description": "Build configuration, e.g. Debug or Release"
                        },
                        "destination": {
                            "type": "string",
                            "description": "xcodebuild destination string, e.g. 'platform=iOS Simulator,name=iPhone 15'"
                        }
                    },
                    "required": ["scheme"]
                }),
            },
            executor: CommandExecutor::new(),
        }
    }

    fn build_args(params: &Value, scheme: &str, action: &str) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(path) = params.get("project_path").and_then(|v| v.as_str()) {
            if path.ends_with(".xcworkspace") {
                args.push("-workspace".to_string());
            } else {
                args.push("-project".to_string());
            }
            args.push(path.to_string());
        }

        args.push("-scheme".to_string());
        args.push(scheme.to_string());

        if let Some(configuration) = params.get("configuration").and_then(|v| v.as_str()) {
            args.push("-configuration".to_string());
            args.push(configuration.to_string());
        }

        if let Some(destination) = params.get("destination").and_then(|v| v.as_str()) {
            args.push("-destination".to_string());
            args.push(destination.to_string());
        }

        args.push(action.to_string());
        args
    }

    /// Platform pre-validation: when the failure looks platform-related,
    /// ask xcodebuild what the scheme can build for and append a synthetic
    /// `Available platforms:` summary that the classifier knows to read.
    fn augment_with_available_platforms(&self, params: &Value, scheme: &str, output: &mut String) {
        if !output.contains("not supported") {
            return;
        }

        let args = Self::build_args(params, scheme, "-showdestinations");
        if let Ok(destinations) = self.executor.run("xcodebuild", &args) {
            let platforms = extract_platform_tokens(&destinations.combined);
            if !platforms.is_empty() {
                output.push_str(&format!("\nAvailable platforms: {}\n", platforms.join(", ")));
            }
        }
    }
}

impl Default for BuildProjectKit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for BuildProjectKit {
    async fn execute(&self, params: Value) -> Result<Value> {
        let scheme = params
            .get("scheme")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ServerError::Validation("Missing required parameter: scheme".to_string()))?;

        info!(scheme, "building project");

        let args = Self::build_args(&params, scheme, "build");
        let output = self.executor.run("xcodebuild", &args)?;
        let diagnostics = parse_compile_output(&output.combined);

        if output.success {
            return Ok(serde_json::json!({
                "success": true,
                "message": presentation::render_build_success(&diagnostics),
                "warnings": diagnostics.warnings,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }));
        }

        let mut combined = output.combined;
        self.augment_with_available_platforms(&params, scheme, &mut combined);

        let errors = classify_build_errors(&combined);
        let message = if errors.is_empty() && diagnostics.errors.is_empty() {
            presentation::render_unclassified_failure(&combined)
        } else {
            presentation::render_build_failure(&errors, &diagnostics)
        };

        Ok(serde_json::json!({
            "success": false,
            "message": message,
            "build_errors": errors,
            "compile_errors": diagnostics.errors,
            "warnings": diagnostics.warnings,
            "exit_code": output.exit_code,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

/// Lists the schemes of a project or workspace via `xcodebuild -list -json`.
pub struct ListSchemesKit {
    schema: ToolSchema,
    executor: CommandExecutor,
}

impl ListSchemesKit {
    pub fn new() -> Self {
        Self {
            schema: ToolSchema {
                name: "list_schemes".to_string(),
                description: "List the schemes of an Xcode project or workspace".to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "project_path": {
                            "type": "string",
                            "description": "Path to a .xcodeproj or .xcworkspace"
                        }
                    },
                    "required": []
                }),
            },
            executor: CommandExecutor::new(),
        }
    }

    fn schemes_from_listing(listing: &Value) -> Vec<String> {
        // `xcodebuild -list -json` nests schemes under either "project" or
        // "workspace" depending on what it was pointed at.
        ["project", "workspace"]
            .iter()
            .filter_map(|key| listing.get(key))
            .filter_map(|container| container.get("schemes"))
            .filter_map(|schemes| schemes.as_array())
            .flatten()
            .filter_map(|scheme| scheme.as_str().map(str::to_string))
            .collect()
    }
}

impl Default for ListSchemesKit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ListSchemesKit {
    async fn execute(&self, params: Value) -> Result<Value> {
        let mut args = vec!["-list".to_string(), "-json".to_string()];
        if let Some(path) = params.get("project_path").and_then(|v| v.as_str()) {
            if path.ends_with(".xcworkspace") {
                args.push("-workspace".to_string());
            } else {
                args.push("-project".to_string());
            }
            args.push(path.to_string());
        }

        let output = self.executor.run("xcodebuild", &args)?;
        if !output.success {
            let errors = classify_build_errors(&output.combined);
            let diagnostics = parse_compile_output(&output.combined);
            return Ok(serde_json::json!({
                "success": false,
                "message": presentation::render_build_failure(&errors, &diagnostics),
                "build_errors": errors,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }));
        }

        // xcodebuild sometimes prefixes the JSON with informational lines;
        // parse from the first brace.
        let json_start = output.combined.find('{').unwrap_or(0);
        let listing: Value = serde_json::from_str(output.combined[json_start..].trim())
            .map_err(|e| ServerError::Execution(format!("Failed to parse -list output: {e}")))?;

        Ok(serde_json::json!({
            "success": true,
            "schemes": Self::schemes_from_listing(&listing),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}
