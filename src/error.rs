//! Error types for QuoteDeck operations

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by quote operations.
///
/// Every variant leaves the collection and persisted state as they were
/// before the failed operation.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid import file: {0}")]
    InvalidImport(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for QuoteError {
    fn from(e: reqwest::Error) -> Self {
        QuoteError::Network(e.to_string())
    }
}
