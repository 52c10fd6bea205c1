//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Route output to the configured log file when one is set
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Log destination is fixed at startup; an unopenable file is fatal
//! - `RUST_LOG`-style env filter overrides the built-in default
//! - ANSI colors disabled for file output

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors from logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("error opening log file {path}: {source}")]
    OpenLogFile {
        path: String,
        source: std::io::Error,
    },
}

/// Initialize the global subscriber, writing to `log_file` when given and
/// the process standard stream otherwise.
pub fn init(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cmdserve=info,tower_http=info".into());

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::OpenLogFile {
                    path: path.display().to_string(),
                    source,
                })?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Arc::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}
