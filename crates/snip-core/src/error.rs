//! Error types for snip-core

use thiserror::Error;

/// Result type alias using snip-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in snip-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown stylist identifier
    #[error("Unknown stylist: {0}")]
    UnknownStylist(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Booking not found
    #[error("Booking not found: {0}")]
    NotFound(String),

    /// Replication transport failure
    #[error("Replication transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
