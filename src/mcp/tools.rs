//! Tool registry: the static list of tools a server advertises.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ToolError;

/// A tool definition as returned by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Ordered set of tool descriptors. Names are unique.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor, rejecting a name that is already registered.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        if self.contains(&descriptor.name) {
            return Err(ToolError::DuplicateTool(descriptor.name));
        }
        self.tools.push(descriptor);
        Ok(())
    }

    /// All descriptors in registration order.
    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, "test tool", json!({"type": "object", "properties": {}}))
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("b")).unwrap();
        registry.register(descriptor("a")).unwrap();
        let names: Vec<&str> = registry.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(registry.contains("a"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("a")).unwrap();
        assert_eq!(
            registry.register(descriptor("a")),
            Err(ToolError::DuplicateTool("a".into()))
        );
        assert_eq!(registry.list_tools().len(), 1);
    }

    #[test]
    fn test_descriptor_serializes_input_schema_camel_case() {
        let json = serde_json::to_value(descriptor("a")).unwrap();
        assert!(json.get("inputSchema").is_some());
        assert!(json.get("input_schema").is_none());
    }
}
