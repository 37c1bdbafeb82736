//! Configuration types for the SalesPulse store.
//!
//! Configuration can be loaded from a YAML file (`salespulse.yaml`) or built
//! in code via `Default`. Every field has a sensible default so an empty file
//! yields a working in-memory store.

pub mod avatar;
pub mod storage;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use avatar::AvatarConfig;
pub use storage::{StorageBackend, StorageConfig};

/// Complete store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Persistence substrate settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Avatar synthesis settings.
    #[serde(default)]
    pub avatar: AvatarConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl StoreConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }
}
