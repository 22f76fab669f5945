//! Logging setup
//!
//! One `tracing` subscriber for both binaries: `RUST_LOG` wins, otherwise the
//! configured level applies to this crate and to HTTP tracing. Output goes to
//! stderr or the configured file, as human-readable text or JSON lines.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::{
    filter::ParseError, fmt, fmt::writer::BoxMakeWriter, layer::SubscriberExt,
    util::SubscriberInitExt, util::TryInitError, EnvFilter, Layer,
};

use crate::config::LoggingConfig;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("Failed to open log file {path:?}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Logging already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Filter directives used when `RUST_LOG` is unset
pub fn default_directives(level: &str) -> String {
    format!("hydromonitor={level},tower_http={level}", level = level.trim())
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(&config.level))?,
    };

    let (writer, ansi) = match &config.file {
        Some(path) => {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| LoggingError::File {
                    path: path.clone(),
                    source,
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LoggingError::File { path, source })?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer = if config.format.eq_ignore_ascii_case("json") {
        fmt::layer().json().with_writer(writer).boxed()
    } else {
        fmt::layer().with_ansi(ansi).with_writer(writer).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("debug"), "hydromonitor=debug,tower_http=debug");
        assert!(EnvFilter::try_new(default_directives("warn")).is_ok());
    }
}
