//! Tracing initialisation.
//!
//! The TUI owns the terminal, so log output always goes to a file through a
//! non-blocking writer.

use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Environment variable that overrides `[logging] level`.
pub const LOG_ENV: &str = "IPGEO_LOG";

/// Initialises the global subscriber.
///
/// Call once at startup. The returned guard must be kept alive for the
/// lifetime of the process so buffered lines are flushed.
///
/// # Errors
/// Returns an error if the log file cannot be opened, the filter is invalid,
/// or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let path = config.file_path();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), &config.level)?;

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}

/// Picks the filter directive: env, then config, then the default level.
fn build_filter(env_value: Option<&str>, config_level: &str) -> Result<EnvFilter> {
    let directive = [env_value, Some(config_level)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(crate::config::Config::DEFAULT_LOG_LEVEL);

    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter: {directive}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        let filter = build_filter(Some("debug"), "warn").unwrap();
        assert_eq!(filter.to_string(), "debug");

        let filter = build_filter(Some("  "), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");

        let filter = build_filter(None, "").unwrap();
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_filter_accepts_targets() {
        let filter = build_filter(None, "ipgeo_core=debug,warn").unwrap();
        assert!(filter.to_string().contains("ipgeo_core=debug"));
    }
}
