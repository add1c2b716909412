//! Error types for the server.

use thiserror::Error;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
