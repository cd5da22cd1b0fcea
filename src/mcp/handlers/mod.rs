//! MCP tool handler implementations.
//!
//! Each module implements a group of related tools:
//! - `files`  -- Filesystem tools (read_file, write_file, list_directory)
//! - `system` -- Host information (get_system_info)
//! - `web`    -- Mock web tools (search_web, fetch_url)
//!
//! Handlers never fail at the protocol level. Operational faults are folded
//! into an ordinary text result whose body describes the error.

pub mod files;
pub mod system;
pub mod web;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result type returned by all MCP tool handlers.
///
/// Matches the MCP protocol's tool result format:
/// ```json
/// {
///   "content": [{ "type": "text", "text": "..." }],
///   "isError": false
/// }
/// ```
///
/// Soft failures are still reported with `isError: false`; the error shows up
/// only in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpToolResult {
    /// Content items, in order.
    pub content: Vec<McpContent>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

/// A single content item in an MCP tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum McpContent {
    /// Text content.
    #[serde(rename = "text")]
    Text { text: String },
}

impl McpToolResult {
    /// Create a single-block text result.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Concatenate every text block (mostly useful for callers that only
    /// care about the body).
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                McpContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fetch a required string argument.
pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!(
            "argument '{}' must be a string, got {}",
            key,
            json_type_name(other)
        )),
        None => Err(format!("missing required argument '{}'", key)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mcp_tool_result_text() {
        let result = McpToolResult::text("hello");
        assert!(!result.is_error);
        assert_eq!(result.content.len(), 1);
        match &result.content[0] {
            McpContent::Text { text } => assert_eq!(text, "hello"),
        }
    }

    #[test]
    fn test_mcp_tool_result_serialize() {
        let result = McpToolResult::text("test");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"content":[{"type":"text","text":"test"}],"isError":false}"#);
    }

    #[test]
    fn test_joined_text_multiple_blocks() {
        let result = McpToolResult {
            content: vec![
                McpContent::Text { text: "a".into() },
                McpContent::Text { text: "b".into() },
            ],
            is_error: false,
        };
        assert_eq!(result.joined_text(), "a\nb");
    }

    #[test]
    fn test_required_str() {
        let args = json!({"path": "/tmp/x", "n": 3});
        assert_eq!(required_str(&args, "path").unwrap(), "/tmp/x");
        assert_eq!(
            required_str(&args, "n").unwrap_err(),
            "argument 'n' must be a string, got number"
        );
        assert_eq!(
            required_str(&args, "missing").unwrap_err(),
            "missing required argument 'missing'"
        );
    }
}
