use crate::config::default_storage_key;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recipe storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the recipe slot (None = platform data directory).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Storage key the recipe collection is kept under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_storage_key(),
        }
    }
}
