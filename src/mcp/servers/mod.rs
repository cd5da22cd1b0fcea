//! The two concrete servers. Each one is a [`ToolServer`](super::server::ToolServer)
//! with its own tool set.

pub mod localops;
pub mod websearch;

/// Version reported by both servers during `initialize`.
pub const SERVER_VERSION: &str = "1.0.0";
