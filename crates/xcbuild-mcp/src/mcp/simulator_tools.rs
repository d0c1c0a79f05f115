//! Simulator lifecycle and app-management tools, all delegating to
//! `xcrun simctl`.

use super::server::{Tool, ToolSchema};
use crate::execution::CommandExecutor;
use crate::{Result, ServerError};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ServerError::Validation(format!("Missing required parameter: {key}")))
}

/// Flattened view of one simulator from `simctl list devices -j`.
fn flatten_device_list(listing: &Value) -> Vec<Value> {
    let mut devices = Vec::new();
    let Some(runtimes) = listing["devices"].as_object() else {
        return devices;
    };

    for (runtime, runtime_devices) in runtimes {
        let Some(runtime_devices) = runtime_devices.as_array() else {
            continue;
        };
        for device in runtime_devices {
            devices.push(json!({
                "name": device["name"],
                "udid": device["udid"],
                "state": device["state"],
                "is_available": device["isAvailable"],
                "runtime": runtime,
            }));
        }
    }

    devices
}

fn device_state(listing: &Value, device_id: &str) -> Option<String> {
    let runtimes = listing["devices"].as_object()?;
    for runtime_devices in runtimes.values() {
        let Some(runtime_devices) = runtime_devices.as_array() else {
            continue;
        };
        for device in runtime_devices {
            if device["udid"].as_str() == Some(device_id) {
                return device["state"].as_str().map(str::to_string);
            }
        }
    }
    None
}

pub struct ListSimulatorsKit {
    schema: ToolSchema,
    executor: CommandExecutor,
}

impl ListSimulatorsKit {
    pub fn new() -> Self {
        Self {
            schema: ToolSchema {
                name: "list_simulators".to_string(),
                description: "List available iOS/tvOS/watchOS simulators".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "booted_only": {
                            "type": "boolean",
                            "description": "Only list currently booted simulators"
                        }
                    },
                    "required": []
                }),
            },
            executor: CommandExecutor::new(),
        }
    }
}

impl Default for ListSimulatorsKit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ListSimulatorsKit {
    async fn execute(&self, params: Value) -> Result<Value> {
        let mut args: Vec<String> = ["simctl", "list", "devices", "-j"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        if params.get("booted_only").and_then(|v| v.as_bool()) == Some(true) {
            args.insert(3, "booted".to_string());
        }

        let output = self.executor.run_xcrun(&args)?;
        if !output.success {
            return Err(ServerError::Execution(format!(
                "simctl list failed: {}",
                output.combined.trim()
            )));
        }

        let listing: Value = serde_json::from_str(output.combined.trim())
            .map_err(|e| ServerError::Execution(format!("Failed to parse simctl output: {e}")))?;

        Ok(json!({
            "devices": flatten_device_list(&listing),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

pub struct BootSimulatorKit {
    schema: ToolSchema,
    executor: CommandExecutor,
}

impl BootSimulatorKit {
    pub fn new() -> Self {
        Self {
            schema: ToolSchema {
                name: "boot_simulator".to_string(),
                description: "Boot a simulator if it is not already booted".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "device_id": {
                            "type": "string",
                            "description": "Simulator UDID"
                        }
                    },
                    "required": ["device_id"]
                }),
            },
            executor: CommandExecutor::new(),
        }
    }
}

impl Default for BootSimulatorKit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for BootSimulatorKit {
    async fn execute(&self, params: Value) -> Result<Value> {
        let device_id = required_str(&params, "device_id")?;

        let list_args: Vec<String> = ["simctl", "list", "devices", "-j"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let list_output = self.executor.run_xcrun(&list_args)?;
        if !list_output.success {
            return Err(ServerError::Execution("Failed to list devices".to_string()));
        }

        let listing: Value = serde_json::from_str(list_output.combined.trim())
            .map_err(|e| ServerError::Execution(format!("Failed to parse device list: {e}")))?;

        let state = device_state(&listing, device_id).ok_or_else(|| {
            ServerError::Validation(format!("No simulator with UDID {device_id} exists"))
        })?;

        if state == "Booted" {
            return Ok(json!({
                "success": true,
                "device_id": device_id,
                "state": "Booted",
                "message": "Simulator is already booted",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }));
        }

        info!(device_id, "booting simulator");
        let boot_args: Vec<String> = vec!["simctl".to_string(), "boot".to_string(), device_id.to_string()];
        let boot_output = self.executor.run_xcrun(&boot_args)?;
        if !boot_output.success {
            return Err(ServerError::Execution(format!(
                "simctl boot failed: {}",
                boot_output.combined.trim()
            )));
        }

        Ok(json!({
            "success": true,
            "device_id": device_id,
            "state": "Booted",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

pub struct InstallAppKit {
    schema: ToolSchema,
    executor: CommandExecutor,
}

impl InstallAppKit {
    pub fn new() -> Self {
        Self {
            schema: ToolSchema {
                name: "install_app".to_string(),
                description: "Install a .app bundle on a booted simulator".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "device_id": {
                            "type": "string",
                            "description": "Simulator UDID, or 'booted' for the current device"
                        },
                        "app_path": {
                            "type": "string",
                            "description": "Path to the built .app bundle"
                        }
                    },
                    "required": ["device_id", "app_path"]
                }),
            },
            executor: CommandExecutor::new(),
        }
    }
}

impl Default for InstallAppKit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for InstallAppKit {
    async fn execute(&self, params: Value) -> Result<Value> {
        let device_id = required_str(&params, "device_id")?;
        let app_path = required_str(&params, "app_path")?;

        if !app_path.ends_with(".app") {
            return Err(ServerError::Validation(format!(
                "app_path must point at a .app bundle, got {app_path}"
            )));
        }

        info!(device_id, app_path, "installing app");
        let args: Vec<String> = vec![
            "simctl".to_string(),
            "install".to_string(),
            device_id.to_string(),
            app_path.to_string(),
        ];
        let output = self.executor.run_xcrun(&args)?;
        if !output.success {
            return Err(ServerError::Execution(format!(
                "simctl install failed: {}",
                output.combined.trim()
            )));
        }

        Ok(json!({
            "success": true,
            "device_id": device_id,
            "app_path": app_path,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}

pub struct LaunchAppKit {
    schema: ToolSchema,
    executor: CommandExecutor,
}

impl LaunchAppKit {
    pub fn new() -> Self {
        Self {
            schema: ToolSchema {
                name: "launch_app".to_string(),
                description: "Launch an installed app on a simulator by bundle identifier".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "device_id": {
                            "type": "string",
                            "description": "Simulator UDID, or 'booted' for the current device"
                        },
                        "bundle_id": {
                            "type": "string",
                            "description": "Bundle identifier of the app to launch"
                        }
                    },
                    "required": ["device_id", "bundle_id"]
                }),
            },
            executor: CommandExecutor::new(),
        }
    }
}

impl Default for LaunchAppKit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for LaunchAppKit {
    async fn execute(&self, params: Value) -> Result<Value> {
        let device_id = required_str(&params, "device_id")?;
        let bundle_id = required_str(&params, "bundle_id")?;

        info!(device_id, bundle_id, "launching app");
        let args: Vec<String> = vec![
            "simctl".to_string(),
            "launch".to_string(),
            device_id.to_string(),
            bundle_id.to_string(),
        ];
        let output = self.executor.run_xcrun(&args)?;
        if !output.success {
            return Err(ServerError::Execution(format!(
                "simctl launch failed: {}",
                output.combined.trim()
            )));
        }

        Ok(json!({
            "success": true,
            "device_id": device_id,
            "bundle_id": bundle_id,
            "output": output.combined.trim(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }
}
