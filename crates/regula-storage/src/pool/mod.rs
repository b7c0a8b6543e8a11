//! Connection management: one write connection, a pool of read connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use regula_core::config::IndexConfig;
use regula_core::errors::RegulaResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The single writer plus, for file-backed databases, the read pool.
///
/// In-memory databases have no read pool: a second in-memory connection would
/// be a separate database, so reads go through the writer.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer for `path`, run `init` on it (migrations), then open
    /// the readers. Readers are read-only, so the schema must exist first.
    pub fn open<F>(path: &Path, config: &IndexConfig, init: F) -> RegulaResult<Self>
    where
        F: FnOnce(&rusqlite::Connection) -> RegulaResult<()>,
    {
        let writer = WriteConnection::open(path, config.busy_timeout_ms)?;
        writer.with_conn(init)?;
        let readers = ReadPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory<F>(init: F) -> RegulaResult<Self>
    where
        F: FnOnce(&rusqlite::Connection) -> RegulaResult<()>,
    {
        let writer = WriteConnection::open_in_memory()?;
        writer.with_conn(init)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }

    /// Run a read on the read pool, or on the writer for in-memory databases.
    pub fn with_reader<F, T>(&self, f: F) -> RegulaResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> RegulaResult<T>,
    {
        match &self.readers {
            Some(readers) => readers.with_conn(f),
            None => self.writer.with_conn(f),
        }
    }
}
