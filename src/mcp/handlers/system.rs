//! `get_system_info` -- a flat "Key: Value" report about the host.

use serde_json::Value;
use sysinfo::System;

use super::McpToolResult;

/// Report keys, in output order.
pub const SYSTEM_INFO_KEYS: [&str; 9] = [
    "OS",
    "OS Version",
    "Platform",
    "Machine",
    "Processor",
    "Runtime Version",
    "Runtime Executable",
    "Current Working Directory",
    "User",
];

const UNKNOWN: &str = "Unknown";

pub async fn handle_get_system_info(_args: &Value) -> McpToolResult {
    // sysinfo reads /proc and friends synchronously.
    match tokio::task::spawn_blocking(collect_system_info).await {
        Ok(Ok(pairs)) => McpToolResult::text(format_report(&pairs)),
        Ok(Err(e)) => McpToolResult::text(format!("Error getting system info: {}", e)),
        Err(e) => McpToolResult::text(format!("Error getting system info: {}", e)),
    }
}

fn collect_system_info() -> Result<Vec<(&'static str, String)>, String> {
    let mut sys = System::new();
    sys.refresh_cpu_all();

    let arch = std::env::consts::ARCH.to_string();
    let processor = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| arch.clone());

    let executable = std::env::current_exe()
        .map_err(|e| e.to_string())?
        .display()
        .to_string();
    let cwd = std::env::current_dir()
        .map_err(|e| e.to_string())?
        .display()
        .to_string();

    let values = [
        System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        System::kernel_version()
            .or_else(System::os_version)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        System::long_os_version().unwrap_or_else(|| UNKNOWN.to_string()),
        arch,
        processor,
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        executable,
        cwd,
        current_user(|key| std::env::var(key).ok()),
    ];

    Ok(SYSTEM_INFO_KEYS.into_iter().zip(values).collect())
}

/// `USER`, then `USERNAME`, then the literal "Unknown". Blank values are skipped.
fn current_user(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["USER", "USERNAME"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn format_report(pairs: &[(&str, String)]) -> String {
    let mut out = String::from("System Information:\n\n");
    for (key, value) in pairs {
        out.push_str(&format!("{}: {}\n", key, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_user_fallback_chain() {
        assert_eq!(
            current_user(|k| (k == "USER").then(|| "alice".to_string())),
            "alice"
        );
        assert_eq!(
            current_user(|k| (k == "USERNAME").then(|| "bob".to_string())),
            "bob"
        );
        assert_eq!(current_user(|_| None), "Unknown");
        assert_eq!(current_user(|_| Some(String::new())), "Unknown");
    }

    #[test]
    fn test_format_report() {
        let text = format_report(&[("OS", "Linux".into()), ("User", "x".into())]);
        assert_eq!(text, "System Information:\n\nOS: Linux\nUser: x\n");
    }

    #[tokio::test]
    async fn test_system_info_has_all_keys() {
        let text = handle_get_system_info(&json!({})).await.joined_text();
        assert!(text.starts_with("System Information:\n\n"));
        for key in SYSTEM_INFO_KEYS {
            assert!(
                text.lines().any(|l| l.starts_with(&format!("{}: ", key))),
                "missing key {key}"
            );
        }
        let user = text
            .lines()
            .find_map(|l| l.strip_prefix("User: "))
            .unwrap();
        assert!(!user.trim().is_empty());
    }
}
