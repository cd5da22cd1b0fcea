//! `localops` -- filesystem and system utilities for the desktop agent.

use serde_json::{json, Value};

use super::SERVER_VERSION;
use crate::mcp::error::ToolError;
use crate::mcp::handlers::{files, system};
use crate::mcp::server::ToolServer;
use crate::mcp::tools::ToolDescriptor;

pub const SERVER_NAME: &str = "localops";

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        read_file_tool(),
        write_file_tool(),
        list_directory_tool(),
        get_system_info_tool(),
    ]
}

fn read_file_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "read_file",
        "Read the contents of a file",
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the file to read"
                }
            },
            "required": ["path"]
        }),
    )
}

fn write_file_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "write_file",
        "Write content to a file",
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "Content to write to the file"
                }
            },
            "required": ["path", "content"]
        }),
    )
}

fn list_directory_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "list_directory",
        "List files and directories in a directory",
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the directory to list"
                }
            },
            "required": ["path"]
        }),
    )
}

fn get_system_info_tool() -> ToolDescriptor {
    ToolDescriptor::new(
        "get_system_info",
        "Get system information",
        json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    )
}

/// Build the `localops` server with every tool wired to its handler.
pub fn server() -> Result<ToolServer, ToolError> {
    let mut server = ToolServer::new(SERVER_NAME, SERVER_VERSION);

    server.register(read_file_tool(), |args: Value| async move {
        files::handle_read_file(&args).await
    })?;
    server.register(write_file_tool(), |args: Value| async move {
        files::handle_write_file(&args).await
    })?;
    server.register(list_directory_tool(), |args: Value| async move {
        files::handle_list_directory(&args).await
    })?;
    server.register(get_system_info_tool(), |args: Value| async move {
        system::handle_get_system_info(&args).await
    })?;

    Ok(server)
}
