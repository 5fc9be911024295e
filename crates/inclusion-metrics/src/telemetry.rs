//! Structured logging bootstrap shared by the binaries.

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directive: String },
    AlreadyInitialized,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive } => {
                write!(f, "log filter directive {directive:?} is invalid")
            }
            TelemetryError::AlreadyInitialized => {
                write!(f, "a global tracing subscriber is already installed")
            }
        }
    }
}

impl std::error::Error for TelemetryError {}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// whole service.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|_| TelemetryError::InvalidFilter {
            directive: config.log_level.clone(),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInitialized)?;

    Ok(())
}
