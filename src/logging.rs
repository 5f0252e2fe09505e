// 📝 Logging - tracing subscriber setup for both binaries
//
// The TUI owns the terminal, so it logs to a timestamped file. The server
// logs to stdout. RUST_LOG always wins over the configured level.

use crate::config::AppConfig;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive used when RUST_LOG is not set
pub fn default_directive(config: &AppConfig, debug: bool) -> String {
    if debug {
        "skill_tracker=debug".to_string()
    } else {
        format!("skill_tracker={}", config.log_level.trim())
    }
}

fn env_filter(config: &AppConfig, debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(config, debug)))
}

/// Log to `<log_dir>/skill-tracker-<timestamp>.log`.
///
/// Keep the returned guard alive for the life of the process or buffered
/// lines are lost on exit.
pub fn init_file_logging(config: &AppConfig, debug: bool) -> (WorkerGuard, PathBuf) {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("skill-tracker-{timestamp}.log");
    let log_path = config.log_dir.join(&log_filename);

    let file_appender = tracing_appender::rolling::never(&config.log_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(env_filter(config, debug))
        .init();

    (guard, log_path)
}

/// Log to stdout (server, one-shot CLI commands)
pub fn init_stdout_logging(config: &AppConfig, debug: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter(config, debug))
        .init();
}
