//! Protocol-level faults.
//!
//! Only conditions that must surface as JSON-RPC errors live here. Faults
//! inside a known tool are reported as text by the handlers themselves.

use thiserror::Error;

/// JSON-RPC "Invalid params".
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC "Internal error".
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing tool name in params")]
    MissingToolName,

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}

impl ToolError {
    /// JSON-RPC error code used when this fault is reported to a client.
    pub fn code(&self) -> i64 {
        match self {
            ToolError::UnknownTool(_) | ToolError::MissingToolName => INVALID_PARAMS,
            ToolError::DuplicateTool(_) => INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_and_codes() {
        let e = ToolError::UnknownTool("nope".into());
        assert_eq!(e.to_string(), "Unknown tool: nope");
        assert_eq!(e.code(), -32602);
        assert_eq!(ToolError::MissingToolName.code(), -32602);
        assert_eq!(ToolError::DuplicateTool("x".into()).code(), -32603);
    }
}
