//! Logging setup
//!
//! The kit only emits `tracing` events. Hosts without their own subscriber
//! can install one here.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// File name prefix for rolling log files
const LOG_FILE_PREFIX: &str = "permission-kit.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default `info`)
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

/// Install a daily-rolling file subscriber writing JSON lines into `dir`
///
/// Keep the returned guard alive; dropping it flushes and stops the writer.
pub fn init_file_logging(dir: impl AsRef<Path>) -> anyhow::Result<WorkerGuard> {
    let appender = tracing_appender::rolling::daily(dir.as_ref(), LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install file log subscriber: {}", e))?;

    Ok(guard)
}
