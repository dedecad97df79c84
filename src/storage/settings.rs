//! Settings storage
//!
//! Manages persistence of the application configuration.

use crate::storage::{get_data_dir, StorageError};
use crate::types::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from the data directory
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppConfig {
    match get_settings_path() {
        Ok(path) => load_settings_from(&path),
        Err(e) => {
            tracing::warn!("Failed to locate settings, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

/// Load settings from a specific file, falling back to defaults
pub fn load_settings_from(path: &Path) -> AppConfig {
    match load_settings_internal(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_internal(path: &Path) -> Result<AppConfig, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppConfig = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to the data directory
pub fn save_settings(settings: &AppConfig) -> Result<(), StorageError> {
    save_settings_to(&get_settings_path()?, settings)
}

/// Save settings to a specific file
pub fn save_settings_to(path: &Path, settings: &AppConfig) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}
