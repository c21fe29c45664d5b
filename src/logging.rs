//! Diagnostic logging setup.
//!
//! The transcript goes to stdout; diagnostics from `tracing` go to stderr so
//! the two never interleave in captured output.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceLock<LogLevel> = OnceLock::new();

/// Verbosity of stderr diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    #[default]
    Warning,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map a `-v` repetition count to a level.
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => LogLevel::Warning,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Errors from logger initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Failed to initialize logger: {reason}")]
    InitializationFailed { reason: String },
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn init(level: LogLevel) -> Result<(), LoggerError> {
    if INITIALIZED.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("compdeps={}", level.directive())));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| LoggerError::InitializationFailed {
            reason: e.to_string(),
        })?;

    INITIALIZED
        .set(level)
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::debug!(?level, "logger initialized");
    Ok(())
}
