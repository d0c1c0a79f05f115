//! Thin subprocess wrapper for `xcodebuild`, `xcrun`, and `swift`.
//!
//! The parsers in `xcbuild-output` work on a single already-captured text
//! blob, so this wrapper always returns stdout and stderr concatenated and
//! never truncates either stream.

use crate::{Result, ServerError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// stdout followed by stderr, verbatim.
    pub combined: String,
}

#[derive(Debug, Clone)]
pub struct CommandExecutor {
    working_dir: PathBuf,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self {
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn with_working_dir(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    pub fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        debug!(program, ?args, "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| ServerError::Execution(format!("Failed to run {program}: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        Ok(CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            combined: format!("{stdout}\n{stderr}"),
        })
    }

    pub fn run_xcrun(&self, args: &[String]) -> Result<CommandOutput> {
        self.run("xcrun", args)
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}
