//! Storage error types
//!
//! Defines all errors that can occur while reading or writing the persisted slot.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of the entry list failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The slot exists but does not hold a valid entry list
    #[error("Corrupt slot '{key}': {reason}")]
    Corruption { key: String, reason: String },

    /// Slot key cannot be mapped onto the store
    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
