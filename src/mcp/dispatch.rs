//! Tool dispatcher: an explicit name -> handler map built once at startup.

use std::collections::HashMap;
use std::future::Future;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::{Map, Value};
use tracing::info;

use super::error::ToolError;
use super::handlers::McpToolResult;

type ToolHandler = Box<dyn Fn(Value) -> BoxFuture<'static, McpToolResult> + Send + Sync>;

pub struct Dispatcher {
    server_name: String,
    handlers: HashMap<String, ToolHandler>,
}

impl Dispatcher {
    pub fn new(server_name: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            handlers: HashMap::new(),
        }
    }

    /// Bind `name` to `handler`. Each name may be bound once.
    pub fn register<F, Fut>(&mut self, name: &str, handler: F) -> Result<(), ToolError>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpToolResult> + Send + 'static,
    {
        if self.handlers.contains_key(name) {
            return Err(ToolError::DuplicateTool(name.to_string()));
        }
        self.handlers
            .insert(name.to_string(), Box::new(move |args| handler(args).boxed()));
        Ok(())
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Run the handler bound to `name`.
    ///
    /// Unknown names are the only failure. Whatever the handler returns,
    /// including error-shaped text, is passed through unchanged. Arguments
    /// that are missing or not an object are replaced with `{}`.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<McpToolResult, ToolError> {
        info!("[{}] Executing tool: {}", self.server_name, name);

        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let arguments = match arguments {
            Value::Object(_) => arguments,
            _ => Value::Object(Map::new()),
        };
        Ok(handler(arguments).await)
    }
}
