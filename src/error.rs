//! Error types for Webvcr

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for Webvcr operations
pub type Result<T> = std::result::Result<T, VcrError>;

/// Errors that can occur in Webvcr
#[derive(Debug, Error)]
pub enum VcrError {
    /// I/O error while reading or writing a cassette
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Cassette file exists but cannot be parsed
    #[error("Corrupt cassette at {}: {reason}", path.display())]
    CorruptCassette {
        /// Path of the unparsable file
        path: PathBuf,
        /// Parse failure detail
        reason: String,
    },

    /// No recorded entry matches the request fingerprint
    #[error("No recording found for fingerprint {0}")]
    NoMatchingRecording(String),

    /// Live network failure during record or pass-through
    #[error("Transport error: {0}")]
    Transport(String),

    /// Browser driver failed to install or remove a route
    #[error("Driver error: {0}")]
    Driver(String),

    /// Invalid cassette name
    #[error("Invalid cassette name: {0}")]
    InvalidCassetteName(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}
