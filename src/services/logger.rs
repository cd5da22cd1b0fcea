use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServerConfig;

/// Initialize the structured logging system for a stdio server.
///
/// Sets up:
/// - Console output on stderr. stdout is reserved for JSON-RPC, so nothing
///   is ever logged there.
/// - Optional file output: rolling log files `{log_dir}/{name}.log` with daily
///   rotation, keeping the latest 5 files.
/// - Environment filter from `config.log_filter`, defaulting to `info`.
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process. Calling this twice leaves the first subscriber in place.
pub fn init(config: &ServerConfig, name: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .compact();

    let mut file_error = None;
    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(log_dir) => {
            let appender = fs::create_dir_all(log_dir)
                .map_err(|e| e.to_string())
                .and_then(|_| {
                    RollingFileAppender::builder()
                        .rotation(Rotation::DAILY)
                        .filename_prefix(name)
                        .filename_suffix("log")
                        .max_log_files(5)
                        .build(log_dir)
                        .map_err(|e| e.to_string())
                });
            match appender {
                Ok(appender) => {
                    let (writer, guard) = tracing_appender::non_blocking(appender);
                    let layer = fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true);
                    (Some(layer), Some(guard))
                }
                Err(e) => {
                    file_error = Some(e);
                    (None, None)
                }
            }
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    match (&config.log_dir, file_error) {
        (Some(dir), Some(e)) => {
            tracing::warn!(log_dir = %dir.display(), "File logging disabled: {}", e);
        }
        (Some(dir), None) => {
            tracing::info!(log_dir = %dir.display(), "Logger initialized");
        }
        _ => {}
    }

    guard
}
