use serde::{Deserialize, Serialize};

/// Standard MCP error codes for consistent error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    // Standard JSON-RPC error codes
    pub const PARSE_ERROR: Self = Self(-32700);
    pub const INVALID_REQUEST: Self = Self(-32600);
    pub const METHOD_NOT_FOUND: Self = Self(-32601);
    pub const INVALID_PARAMS: Self = Self(-32602);
    pub const INTERNAL_ERROR: Self = Self(-32603);

    // Custom MCP error codes (range -32000 to -32099)
    pub const TOOL_NOT_FOUND: Self = Self(-32000);
    pub const TOOL_EXECUTION_FAILED: Self = Self(-32001);
    pub const INVALID_TOOL_PARAMS: Self = Self(-32002);
    pub const VALIDATION_ERROR: Self = Self(-32003);
    pub const TIMEOUT_ERROR: Self = Self(-32004);
    pub const XCODE_NOT_FOUND: Self = Self(-32005);
    pub const SIMULATOR_NOT_FOUND: Self = Self(-32006);
}

impl ErrorCode {
    /// Get a human-readable description of the error code
    pub fn description(&self) -> &'static str {
        match self.0 {
            -32700 => "Parse error: Invalid JSON was received",
            -32600 => "Invalid Request: The JSON sent is not a valid Request object",
            -32601 => "Method not found: The method does not exist or is not available",
            -32602 => "Invalid params: Invalid method parameter(s)",
            -32603 => "Internal error: Internal JSON-RPC error",
            -32000 => "Tool not found: The requested tool does not exist",
            -32001 => "Tool execution failed: The tool encountered an error during execution",
            -32002 => "Invalid tool params: The tool parameters are invalid or missing",
            -32003 => "Validation error: Input validation failed",
            -32004 => "Timeout error: Operation timed out",
            -32005 => "Xcode not found: xcodebuild or xcrun is not available on this host",
            -32006 => "Simulator not found: No simulator matches the given identifier",
            _ => "Unknown error",
        }
    }
}

/// Structured error response for MCP protocol
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.description().to_string(),
            data: None,
        }
    }
}

impl From<crate::ServerError> for ErrorResponse {
    fn from(error: crate::ServerError) -> Self {
        match &error {
            crate::ServerError::Mcp(msg) => {
                ErrorResponse::new(ErrorCode::INTERNAL_ERROR, format!("MCP error: {msg}"))
            }
            crate::ServerError::Validation(msg) => ErrorResponse::new(
                ErrorCode::VALIDATION_ERROR,
                format!("Validation error: {msg}"),
            ),
            crate::ServerError::Execution(msg) => ErrorResponse::new(
                ErrorCode::TOOL_EXECUTION_FAILED,
                format!("Execution error: {msg}"),
            ),
            _ => ErrorResponse::new(ErrorCode::INTERNAL_ERROR, error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_descriptions() {
        assert_eq!(
            ErrorCode::PARSE_ERROR.description(),
            "Parse error: Invalid JSON was received"
        );
        assert!(ErrorCode::SIMULATOR_NOT_FOUND.description().contains("Simulator"));
    }

    #[test]
    fn error_response_from_code_uses_description() {
        let err = ErrorResponse::from_code(ErrorCode::TIMEOUT_ERROR);
        assert_eq!(err.code, ErrorCode::TIMEOUT_ERROR);
        assert!(err.message.contains("timed out"));
    }

    #[test]
    fn server_error_conversion() {
        let err: ErrorResponse = crate::ServerError::Validation("missing scheme".to_string()).into();
        assert_eq!(err.code, ErrorCode::VALIDATION_ERROR);
        assert!(err.message.contains("missing scheme"));
    }
}
