//! Logging Infrastructure
//!
//! Structured logging setup for development and production.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with defaults (`RUST_LOG` respected, info fallback)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// When a log directory is given and exists, output additionally rolls into a
/// daily file there.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let default_level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "store-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
