//! # regula-storage
//!
//! Vector index backends for rule embeddings.
//!
//! `SqliteVectorIndex` persists records in a single SQLite file (WAL mode,
//! one writer, a pool of read-only readers) and swaps whole generations on
//! reindex. `MemoryVectorIndex` keeps an immutable snapshot in memory. Both
//! rank with the same exact cosine scan.

pub mod blob;
pub mod engine;
pub mod guards;
pub mod memory_index;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod scoring;

pub use engine::SqliteVectorIndex;
pub use memory_index::MemoryVectorIndex;

use regula_core::errors::{RegulaError, StorageError};

/// Helper to convert a message into a `RegulaError::StorageError`.
pub fn to_storage_err(msg: impl Into<String>) -> RegulaError {
    RegulaError::StorageError(StorageError::SqliteError {
        message: msg.into(),
    })
}

/// The index at `path` cannot be opened or used.
pub fn to_unavailable(path: impl Into<String>, reason: impl Into<String>) -> RegulaError {
    RegulaError::StorageError(StorageError::Unavailable {
        path: path.into(),
        reason: reason.into(),
    })
}
