//! Error types for the placement engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during placement and queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input was absent or empty; rejected before any table mutation.
    #[error("input must not be empty")]
    EmptyInput,

    /// Strategy name did not match any known strategy.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    /// No node had free capacity after a full probe cycle.
    #[error("all storage nodes are full")]
    TableFull,

    /// Node id did not match any node.
    #[error("storage node not found: {0}")]
    NodeNotFound(u32),
}
