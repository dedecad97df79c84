//! String key-value stores
//!
//! `FileStore` survives restarts, `MemoryStore` lives as long as the process.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::storage::StorageError;

/// Minimal get/set contract shared by persistent and session storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File name of the persistent store inside the data directory
pub const STORE_FILE: &str = "storage.json";

/// All keys in a single JSON object file
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the backing file
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) `storage.json` inside `dir`
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(STORE_FILE))
    }

    /// Use an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(map)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Wrote {} keys to {:?}", map.len(), self.path);
        Ok(())
    }

    /// Move an unparseable store file out of the way so writes can proceed
    fn set_aside_corrupt(
        &self,
        error: serde_json::Error,
    ) -> Result<BTreeMap<String, String>, StorageError> {
        let backup = self.path.with_extension("json.corrupt");
        tracing::warn!(
            "Store file {:?} is corrupt ({}), moving it to {:?}",
            self.path,
            error,
            backup
        );
        fs::rename(&self.path, &backup)?;
        Ok(BTreeMap::new())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().expect("store mutex poisoned");
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Json(e)) => self.set_aside_corrupt(e)?,
            Err(e) => return Err(e),
        };
        apply(&mut map);
        self.write_map(&map)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.remove(key);
        })
    }
}

/// In-process store used for session state and as a fallback
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("memory store mutex poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("memory store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("memory store mutex poisoned")
            .remove(key);
        Ok(())
    }
}
