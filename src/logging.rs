//! Logging infrastructure.
//!
//! Structured logs go to the console and to a daily-rolling file in the
//! configured log directory. The level defaults to `info` and can be
//! overridden with `RUST_LOG`.

use anyhow::{Context as _, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Initialize the logging system with console and file output.
///
/// Creates `log_dir` if needed and writes `dbdoc.<date>.log` files there,
/// rotating daily and keeping the last 10.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the subscriber is
/// already set.
pub fn init(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("dbdoc")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create log file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer().with_target(true);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging subscriber")?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(())
}
