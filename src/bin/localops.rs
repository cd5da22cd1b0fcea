//! Local Operations MCP server: filesystem and system utilities for the desktop agent.
//!
//! Communicates with the MCP client via **stdio** (JSON-RPC 2.0, one message
//! per line). Diagnostics go to stderr.
//!
//! Environment variables:
//! - `RUST_LOG`     -- log filter (default `info`)
//! - `MCP_LOG_DIR`  -- directory for rolling log files (optional)
//! - `MCP_LOG_FILE` -- `1` to log to the default data directory

use agent_tools_lib::config::ServerConfig;
use agent_tools_lib::mcp::server::run_server;
use agent_tools_lib::mcp::servers::localops;
use agent_tools_lib::services::logger;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = ServerConfig::from_env();
    let log_guard = logger::init(&config, localops::SERVER_NAME);

    let server = match localops::server() {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("[{}] Failed to build tool registry: {}", localops::SERVER_NAME, e);
            drop(log_guard);
            std::process::exit(1);
        }
    };

    // Blocks until stdin closes
    if let Err(e) = run_server(server).await {
        tracing::error!("[{}] Server error: {}", localops::SERVER_NAME, e);
        drop(log_guard);
        std::process::exit(1);
    }
}
