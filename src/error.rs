//! Error types and handling utilities
//!
//! A single structured error type for the whole crate, following the
//! teacher's pattern of `#[from]` conversions plus named struct variants for
//! errors that need extra context the source type doesn't carry.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("error at line {line}: {message}")]
    InputFile { line: usize, message: String },

    #[error("site file not found: {path}")]
    InputFileMissing { path: String },

    #[error("worker failed: {message}")]
    Worker { message: String },

    /// An invariant the type system should have ruled out. Reaching this is a bug.
    #[error("internal invariant violated: {0}")]
    Bug(String),
}

impl MonitorError {
    #[must_use]
    pub fn input_file(line: usize, message: impl Into<String>) -> Self {
        Self::InputFile {
            line,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, MonitorError>;
