//! Storage error types
//!
//! Defines all errors that can occur in the reading store.

use thiserror::Error;

/// Errors that can occur in the reading store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Snapshot file could not be decoded
    #[error("Corrupt data: {0}")]
    Corruption(String),

    /// A reading was rejected before it reached the store
    #[error("Invalid reading: {0}")]
    InvalidReading(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::InvalidReading("reading 7 contains a non-finite value".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid reading: reading 7 contains a non-finite value"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
