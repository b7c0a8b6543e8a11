//! Single write connection behind a mutex. Writes are serialized.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use regula_core::errors::RegulaResult;

use super::pragmas::apply_pragmas;
use crate::{to_storage_err, to_unavailable};

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> RegulaResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_unavailable(path.display().to_string(), e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)
            .map_err(|e| to_unavailable(path.display().to_string(), e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> RegulaResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| to_unavailable(":memory:", e.to_string()))?;
        apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and run `f` with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> RegulaResult<T>
    where
        F: FnOnce(&Connection) -> RegulaResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        f(&guard)
    }
}
