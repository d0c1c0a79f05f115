pub mod execution;
pub mod mcp;
pub mod presentation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("MCP error: {0}")]
    Mcp(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Execution error: {0}")]
    Execution(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
