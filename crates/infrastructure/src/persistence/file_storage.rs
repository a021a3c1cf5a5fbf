//! Key/value storage persisted as a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio::fs;
use tokio::sync::Mutex;

use courier_application::ports::TokenStorage;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

/// Key/value store backed by a JSON object on disk.
///
/// Reads are served from memory; every write rewrites the file.
/// Writes are serialized and land through a temporary file renamed into
/// place, so the file on disk is always a complete snapshot.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Opens the store at `path`, starting empty if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = if fs::try_exists(&path).await? {
            from_json_bytes(&fs::read(&path).await?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            items: RwLock::new(items),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores `value` under `key` and persists the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = {
            let mut items = self.items.write();
            items.insert(key.to_string(), value.to_string());
            items.clone()
        };
        self.persist(&snapshot).await
    }

    /// Removes `key` and persists the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn remove_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let (removed, snapshot) = {
            let mut items = self.items.write();
            let removed = items.remove(key);
            (removed, items.clone())
        };
        self.persist(&snapshot).await?;
        Ok(removed)
    }

    /// Callers must hold `write_lock`.
    async fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, to_json_stable_bytes(items)?).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

impl TokenStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }
}
