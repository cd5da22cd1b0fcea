//! `websearch` -- mock web search and URL fetching for the desktop agent.

use serde_json::{json, Value};

use super::SERVER_VERSION;
use crate::mcp::error::ToolError;
use crate::mcp::handlers::web;
use crate::mcp::server::ToolServer;
use crate::mcp::tools::ToolDescriptor;

pub const SERVER_NAME: &str = "websearch";

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![search_web_tool(), fetch_url_tool()]
}

fn search_web_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "search_web",
        "Search the web for information",
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query to look up on the web"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of results to return",
                    "default": 5
                }
            },
            "required": ["query"]
        }),
    )
}

fn fetch_url_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "fetch_url",
        "Fetch content from a URL",
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL to fetch content from"
                }
            },
            "required": ["url"]
        }),
    )
}

/// Build the `websearch` server with every tool wired to its handler.
pub fn server() -> Result<ToolServer, ToolError> {
    let mut server = ToolServer::new(SERVER_NAME, SERVER_VERSION);

    server.register(search_web_tool(), |args: Value| async move {
        web::handle_search_web(&args).await
    })?;
    server.register(fetch_url_tool(), |args: Value| async move {
        web::handle_fetch_url(&args).await
    })?;

    Ok(server)
}
