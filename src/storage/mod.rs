//! Persistent storage
//!
//! This module handles persistence of the quote collection, the selected
//! category and application settings.

pub mod kv;
pub mod quotes;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "QUOTEDECK_DATA_DIR";

/// Errors raised by the storage layer
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine the data directory")]
    NoDataDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get the application data directory.
///
/// `QUOTEDECK_DATA_DIR` wins when set; otherwise the platform data dir:
/// - Linux: ~/.local/share/quotedeck
/// - macOS: ~/Library/Application Support/com.QuoteDeck.QuoteDeck
/// - Windows: %APPDATA%\QuoteDeck\QuoteDeck\data
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    directories::ProjectDirs::from("com", "QuoteDeck", "QuoteDeck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
