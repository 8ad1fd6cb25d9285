//! Application logging functionality
//!
//! Logs go to stderr. With a log directory they are also written to a daily
//! rolling file there.

use std::fs;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "outlinefix.log";

/// Filter for `level`, unless `RUST_LOG` says otherwise
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Install the global subscriber
///
/// The returned guard flushes the log file when dropped, so keep it alive
/// until the program exits. Returns `None` when no file is being written.
pub fn init_logging(level: Level, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter(level));

    let (file_layer, guard) = match log_dir.map(|dir| (dir, fs::create_dir_all(dir))) {
        Some((dir, Ok(()))) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter(level));
            (Some(layer), Some(guard))
        }
        Some((dir, Err(e))) => {
            eprintln!("Failed to create logs directory {:?}: {}", dir, e);
            (None, None)
        }
        None => (None, None),
    };

    // A subscriber may already be installed (tests, embedding); keep it
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}
