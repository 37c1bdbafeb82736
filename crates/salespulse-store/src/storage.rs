//! Key-value persistence substrate.
//!
//! The store persists each collection under a fixed string key, one
//! serialized payload per key. Two backends exist: a volatile in-memory map
//! (the default, and what unit tests run against) and a one-file-per-key
//! directory layout for durable local storage.
//!
//! Payloads are opaque strings at this layer. Collection keys hold JSON
//! arrays; the sync-timestamp key holds a raw ISO-8601 string.

use crate::error::StoreError;
use salespulse_core::config::{StorageBackend, StorageConfig};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Fixed storage keys, one per collection plus the sync timestamp.
pub mod keys {
    /// User collection (JSON array).
    pub const USERS: &str = "sp_users";
    /// Quantity-target collection (JSON array).
    pub const TARGETS: &str = "sp_targets";
    /// Value-target collection (JSON array).
    pub const VALUE_TARGETS: &str = "sp_value_targets";
    /// Stock collection (JSON array).
    pub const STOCKS: &str = "sp_stocks";
    /// Activity log (JSON array, newest first).
    pub const LOGS: &str = "sp_logs";
    /// Last master-upload timestamp (raw ISO-8601 string, not JSON).
    pub const LAST_SYNC_DATE: &str = "sp_lastSyncDate";
}

/// Trait for key-value storage backends.
///
/// All operations are synchronous; the store writes through on every
/// mutation and assumes writes succeed barring IO faults.
pub trait KeyValueStorage: Send + Sync {
    /// Read the payload stored under `key`, or `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous payload.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Create a storage backend based on configuration.
pub fn create_storage(config: &StorageConfig) -> Result<Box<dyn KeyValueStorage>, StoreError> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStorage::default())),
        StorageBackend::File => {
            let directory = config
                .directory
                .clone()
                .unwrap_or_else(|| PathBuf::from("salespulse-data"));
            Ok(Box::new(FileStorage::new(directory)?))
        }
    }
}

/// In-memory storage.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// reopen a second store over the same data.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File storage: one file per key under a directory.
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    /// Create a new file storage, creating the directory if needed.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();
        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }
        Ok(Self { directory })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
