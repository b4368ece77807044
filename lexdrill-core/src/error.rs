//! Common error types for LexDrill

use thiserror::Error;

/// Common result type for LexDrill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, ledger, and session engine
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty required field
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No sections chosen, or the chosen sections contain no words
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// Operation attempted outside its valid session state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Session token not present in the registry (never issued, or evicted)
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence gateway failure (I/O)
    #[error("Persistence failure: {0}")]
    Io(#[from] std::io::Error),

    /// Persistence gateway failure (document encoding)
    #[error("Persistence failure: {0}")]
    Json(#[from] serde_json::Error),
}
