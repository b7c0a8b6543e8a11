use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector index storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory holding the index database.
    pub path: String,
    /// Database file name inside `path`.
    pub db_filename: String,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
}

impl IndexConfig {
    /// Config pointing at `dir`, other settings defaulted.
    pub fn at(dir: impl Into<String>) -> Self {
        Self {
            path: dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the database file.
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.path).join(&self.db_filename)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_INDEX_DIR.to_string(),
            db_filename: defaults::DEFAULT_DB_FILENAME.to_string(),
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
