//! Process configuration, read from the environment.

use std::path::PathBuf;

const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings shared by both server binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `tracing` filter directive (`RUST_LOG`).
    pub log_filter: String,
    /// Directory for rolling log files; `None` logs to stderr only.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.into(),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Read `RUST_LOG`, `MCP_LOG_DIR` and `MCP_LOG_FILE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup("RUST_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        let log_dir = match lookup("MCP_LOG_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => Some(PathBuf::from(dir)),
            None if lookup("MCP_LOG_FILE").is_some_and(|v| is_truthy(&v)) => default_log_dir(),
            None => None,
        };

        Self { log_filter, log_dir }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// `<local data dir>/agent-tools/logs`.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("agent-tools").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn test_rust_log_and_explicit_dir() {
        let config = config_from(&[("RUST_LOG", "debug"), ("MCP_LOG_DIR", "/var/log/tools")]);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/tools")));
    }

    #[test]
    fn test_log_file_flag_uses_default_dir() {
        let config = config_from(&[("MCP_LOG_FILE", "true")]);
        assert_eq!(config.log_dir, default_log_dir());

        let config = config_from(&[("MCP_LOG_FILE", "0")]);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = config_from(&[("RUST_LOG", "  "), ("MCP_LOG_DIR", "")]);
        assert_eq!(config, ServerConfig::default());
    }
}
