//! Persistence substrate configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend (one file per key).
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Storage backend type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile in-memory map. Default; what tests run against.
    #[default]
    Memory,
    /// One file per key under `directory`.
    File,
}
