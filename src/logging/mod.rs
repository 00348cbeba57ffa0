//! Structured logging setup using tracing
//!
//! Console output always; optionally a non-blocking rolling file writer
//! when `logging.local_enabled` is set. Returns a guard that must be kept
//! alive for the duration of the program so buffered logs are flushed.

use crate::config::LoggingConfig;
use crate::domain::{RelayError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Keeps the non-blocking file writer alive until the process exits.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initializes the tracing subscriber.
///
/// `log_level_str` seeds the env filter (overridable via `RUST_LOG`).
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level_str))
        .map_err(|e| RelayError::Configuration(format!("invalid log level: {e}")))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, file_guard) = if config.local_enabled {
        let rotation = match config.local_rotation.as_str() {
            "hourly" => Rotation::HOURLY,
            "never" => Rotation::NEVER,
            _ => Rotation::DAILY,
        };
        let appender = RollingFileAppender::new(rotation, &config.local_path, "relay.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RelayError::Configuration(format!("failed to init logging: {e}")))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
