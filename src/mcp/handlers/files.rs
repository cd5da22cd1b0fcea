//! Filesystem tool handlers: read_file, write_file, list_directory.
//!
//! Relative paths are made absolute against the process working directory.
//! There is no containment check; any path the process can reach is fair game.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::{required_str, McpToolResult};

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Resolve `raw` to an absolute path.
///
/// Absolute inputs are returned untouched. Relative inputs are joined onto the
/// current working directory and `.`/`..` components are folded lexically.
pub fn resolve_path(raw: &str) -> io::Result<PathBuf> {
    let path = Path::new(raw);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let joined = std::env::current_dir()?.join(path);
    Ok(normalize(&joined))
}

/// Faults that mean "nothing is there", including a path that runs through a
/// regular file (`file.txt/x`).
fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` is a no-op at the root, matching `/..` == `/`
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// read_file
// ---------------------------------------------------------------------------

/// `read_file` -- return the UTF-8 contents of a regular file.
pub async fn handle_read_file(args: &Value) -> McpToolResult {
    match read_file(args).await {
        Ok(text) => McpToolResult::text(text),
        Err(e) => McpToolResult::text(format!("Error reading file: {}", e)),
    }
}

async fn read_file(args: &Value) -> Result<String, String> {
    let path = resolve_path(required_str(args, "path")?).map_err(|e| e.to_string())?;

    let meta = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) if is_missing(&e) => {
            return Ok(format!("Error: File not found: {}", path.display()));
        }
        Err(e) => return Err(e.to_string()),
    };
    if !meta.is_file() {
        return Ok(format!("Error: Path is not a file: {}", path.display()));
    }

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| e.to_string())?;
    debug!("[localops] Read {} bytes from {}", content.len(), path.display());

    Ok(format!("File contents of {}:\n\n{}", path.display(), content))
}

// ---------------------------------------------------------------------------
// write_file
// ---------------------------------------------------------------------------

/// `write_file` -- create or overwrite a file, creating parent directories.
pub async fn handle_write_file(args: &Value) -> McpToolResult {
    match write_file(args).await {
        Ok(text) => McpToolResult::text(text),
        Err(e) => McpToolResult::text(format!("Error writing file: {}", e)),
    }
}

async fn write_file(args: &Value) -> Result<String, String> {
    let raw = required_str(args, "path")?;
    let content = required_str(args, "content")?;
    let path = resolve_path(raw).map_err(|e| e.to_string())?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }
    tokio::fs::write(&path, content.as_bytes())
        .await
        .map_err(|e| e.to_string())?;

    Ok(format!(
        "Successfully wrote {} bytes to {}",
        content.len(),
        path.display()
    ))
}

// ---------------------------------------------------------------------------
// list_directory
// ---------------------------------------------------------------------------

/// `list_directory` -- list entries sorted by name, tagged file/directory.
pub async fn handle_list_directory(args: &Value) -> McpToolResult {
    match list_directory(args).await {
        Ok(text) => McpToolResult::text(text),
        Err(e) => McpToolResult::text(format!("Error listing directory: {}", e)),
    }
}

async fn list_directory(args: &Value) -> Result<String, String> {
    let path = resolve_path(required_str(args, "path")?).map_err(|e| e.to_string())?;

    let meta = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) if is_missing(&e) => {
            return Ok(format!("Error: Directory not found: {}", path.display()));
        }
        Err(e) => return Err(e.to_string()),
    };
    if !meta.is_dir() {
        return Ok(format!("Error: Path is not a directory: {}", path.display()));
    }

    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(&path).await.map_err(|e| e.to_string())?;
    while let Some(entry) = dir.next_entry().await.map_err(|e| e.to_string())? {
        // Follow symlinks so a link to a directory is reported as one.
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        entries.push((entry.file_name(), is_dir));
    }

    if entries.is_empty() {
        return Ok(format!("Directory {} is empty", path.display()));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    let lines: Vec<String> = entries
        .iter()
        .map(|(name, is_dir)| {
            let kind = if *is_dir { "directory" } else { "file" };
            format!("{} ({})", name.to_string_lossy(), kind)
        })
        .collect();

    Ok(format!("Contents of {}:\n\n{}", path.display(), lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path_arg(path: &Path) -> Value {
        json!({ "path": path.to_string_lossy() })
    }

    #[test]
    fn test_normalize_folds_dot_components() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_resolve_path_relative_is_absolute() {
        let resolved = resolve_path("some/relative/file.txt").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/relative/file.txt"));
        assert!(resolved.starts_with(std::env::current_dir().unwrap()));
    }

    #[test]
    fn test_resolve_path_absolute_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("x.txt");
        assert_eq!(resolve_path(&abs.to_string_lossy()).unwrap(), abs);
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip_multibyte() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("deeper").join("notes.txt");
        let content = "héllo wörld — 日本語 🚀";

        let written = handle_write_file(&json!({
            "path": file.to_string_lossy(),
            "content": content,
        }))
        .await
        .joined_text();
        assert_eq!(
            written,
            format!(
                "Successfully wrote {} bytes to {}",
                content.len(),
                file.display()
            )
        );
        assert!(content.len() > content.chars().count());

        let read = handle_read_file(&path_arg(&file)).await.joined_text();
        assert_eq!(
            read,
            format!("File contents of {}:\n\n{}", file.display(), content)
        );
    }

    #[tokio::test]
    async fn test_write_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "old content that is longer").unwrap();

        handle_write_file(&json!({"path": file.to_string_lossy(), "content": "new"})).await;
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_soft_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nope.txt");

        let text = handle_read_file(&path_arg(&file)).await.joined_text();
        assert!(text.starts_with("Error:"));
        assert!(text.contains("not found"));
    }

    #[tokio::test]
    async fn test_path_through_regular_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let nested = file.join("x");

        let read = handle_read_file(&path_arg(&nested)).await.joined_text();
        assert_eq!(read, format!("Error: File not found: {}", nested.display()));

        let list = handle_list_directory(&path_arg(&nested)).await.joined_text();
        assert_eq!(list, format!("Error: Directory not found: {}", nested.display()));
    }

    #[tokio::test]
    async fn test_read_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let text = handle_read_file(&path_arg(dir.path())).await.joined_text();
        assert!(text.starts_with("Error: Path is not a file:"));
    }

    #[tokio::test]
    async fn test_read_invalid_utf8_is_soft_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bin.dat");
        std::fs::write(&file, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let text = handle_read_file(&path_arg(&file)).await.joined_text();
        assert!(text.starts_with("Error reading file:"));
    }

    #[tokio::test]
    async fn test_missing_arguments_are_soft_errors() {
        let read = handle_read_file(&json!({})).await.joined_text();
        assert!(read.starts_with("Error reading file:"));
        let write = handle_write_file(&json!({"path": "/tmp/x"})).await.joined_text();
        assert!(write.starts_with("Error writing file:"));
        assert!(write.contains("content"));
        let list = handle_list_directory(&json!({"path": 7})).await.joined_text();
        assert!(list.starts_with("Error listing directory:"));
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let text = handle_list_directory(&path_arg(dir.path())).await.joined_text();
        assert_eq!(text, format!("Directory {} is empty", dir.path().display()));
    }

    #[tokio::test]
    async fn test_list_directory_sorted_and_tagged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.txt"), "z").unwrap();
        std::fs::create_dir(dir.path().join("beta")).unwrap();
        std::fs::write(dir.path().join("alpha.md"), "a").unwrap();
        std::fs::create_dir(dir.path().join("Gamma")).unwrap();

        let text = handle_list_directory(&path_arg(dir.path())).await.joined_text();
        let expected = format!(
            "Contents of {}:\n\nGamma (directory)\nalpha.md (file)\nbeta (directory)\nzeta.txt (file)",
            dir.path().display()
        );
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn test_list_missing_and_non_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = handle_list_directory(&path_arg(&dir.path().join("gone")))
            .await
            .joined_text();
        assert!(missing.starts_with("Error: Directory not found:"));

        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let not_dir = handle_list_directory(&path_arg(&file)).await.joined_text();
        assert!(not_dir.starts_with("Error: Path is not a directory:"));
    }
}
