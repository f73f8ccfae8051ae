//! Logging Infrastructure
//!
//! tracing-subscriber setup: console output, or a daily rolling file when a
//! log directory exists.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level` when set. With `json = true` lines are
/// emitted as JSON objects. Calling twice is harmless.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&Path>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = match log_dir.filter(|dir| dir.exists()) {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "canteen-server");
            let builder = builder.with_writer(file_appender).with_ansi(false);
            if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        None => {
            if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
