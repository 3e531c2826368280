//! Logging setup for applications embedding the encoder.
//!
//! The library itself only emits `tracing` events:
//!
//! - `debug`: recognised columns missing from the input
//! - `info`: one summary line per encoded batch
//! - `warn`: count cells coerced to missing, columns that could not be imputed
//!
//! [`init`] installs a subscriber that prints to the console and, when a log
//! directory is configured, also writes daily-rotating files.
//!
//! ```no_run
//! use hfea_encode::config::LoggingConfig;
//! use hfea_encode::logging;
//!
//! logging::init(&LoggingConfig::default()).expect("Failed to initialize logging");
//! tracing::info!("ready");
//! ```

use crate::config::LoggingConfig;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Platform data directory for encoder logs
///
/// - Windows: `%APPDATA%/hfea_encode/logs`
/// - macOS: `~/Library/Application Support/hfea_encode/logs`
/// - Linux: `~/.local/share/hfea_encode/logs`
pub fn default_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join("hfea_encode").join("logs"))
}

fn rolling_appender(dir: &Path, prefix: &str, max_files: usize) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(max_files)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("Failed to create {prefix} log appender"))
}

/// Builds the filter: `RUST_LOG` when set, otherwise the configured level.
fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level: {}", config.level))
}

/// Initializes the global subscriber
///
/// With `log_dir` set, two files rotate daily in that directory:
/// - `encoder.<date>.log`: everything that passes the filter
/// - `error.<date>.log`: warnings and errors only
///
/// # Errors
///
/// Returns error if the filter is invalid, the log directory cannot be
/// created, or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let console_layer = fmt::layer().with_target(true).with_line_number(true);

    let (all_logs_layer, error_logs_layer) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            let all_logs = fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(rolling_appender(dir, "encoder", config.max_log_files)?);

            let error_logs = fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(rolling_appender(dir, "error", config.max_log_files)?)
                .with_filter(EnvFilter::new("warn"));

            (Some(all_logs), Some(error_logs))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(console_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(log_dir = ?config.log_dir, "Logging initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_dir() -> Result<()> {
        let log_dir = default_log_dir()?;
        assert!(log_dir.ends_with("hfea_encode/logs") || log_dir.ends_with("hfea_encode\\logs"));
        Ok(())
    }

    #[test]
    fn test_init_creates_log_dir_once() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let dir = tmp.path().join("logs");
        let config = LoggingConfig {
            log_dir: Some(dir.clone()),
            ..LoggingConfig::default()
        };

        init(&config)?;
        assert!(dir.is_dir());
        assert!(init(&config).is_err(), "second subscriber must be refused");
        Ok(())
    }
}
