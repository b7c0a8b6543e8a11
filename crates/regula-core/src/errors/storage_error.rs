use super::error_code::{self, RegulaErrorCode};

/// Storage-layer errors for the persistent vector index.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("index unavailable at {path}: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt record {rule_id}: {reason}")]
    CorruptRecord { rule_id: String, reason: String },
}

impl RegulaErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::INDEX_UNAVAILABLE,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::SqliteError { .. } | Self::CorruptRecord { .. } => error_code::STORAGE_ERROR,
        }
    }
}
