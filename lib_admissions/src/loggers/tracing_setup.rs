use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("log directory could not be created: {0}")]
    Io(#[from] std::io::Error),

    #[error("a global subscriber is already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the filter: `RUST_LOG` wins, otherwise `log_level` is used.
pub fn env_filter(log_level: &str) -> Result<EnvFilter, LoggerError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    Ok(filter)
}

/// # Setup Logging
///
/// Installs a registry with an ANSI console layer on stderr and, when
/// `log_dir` is given, a JSON layer written to a daily rolling
/// `<app_name>.log` file through a non-blocking appender.
///
/// The returned guard flushes the file writer on drop, so the caller must keep
/// it alive for as long as logging is needed.
pub fn setup_logging(
    app_name: &str,
    log_level: &str,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>, LoggerError> {
    let filter = env_filter(log_level)?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = rolling::daily(dir, format!("{app_name}.log"));
            let (writer, guard) = non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(level = log_level, file_output = guard.is_some(), "Logging initialized");
    Ok(guard)
}
