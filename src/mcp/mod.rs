//! MCP (Model Context Protocol) tool servers.
//!
//! Provides a JSON-RPC over stdio server that exposes tools to an agent.
//!
//! Architecture:
//! - `server.rs`   -- JSON-RPC protocol handler (stdin/stdout) and `ToolServer`
//! - `tools.rs`    -- Tool registry (descriptors and input schemas)
//! - `dispatch.rs` -- Tool name -> handler routing
//! - `error.rs`    -- Protocol-level faults
//! - `handlers/`   -- Tool handler implementations (files, system, web)
//! - `servers/`    -- The concrete `localops` and `websearch` tool sets

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod server;
pub mod servers;
pub mod tools;
