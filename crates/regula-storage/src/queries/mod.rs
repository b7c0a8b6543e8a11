//! SQL against the active generation of rule records.

pub mod index_state;
pub mod record_ops;
pub mod vector_search;

use rusqlite::Connection;

use regula_core::errors::RegulaResult;

use crate::to_storage_err;

/// Selects the active generation inside a single statement, so every read
/// sees one consistent generation.
pub(crate) const ACTIVE_GENERATION: &str =
    "(SELECT active_generation FROM index_state WHERE id = 1)";

/// Run `f` inside one DEFERRED transaction so every statement it issues reads
/// the same snapshot. Always ends the transaction, committing on success.
pub fn read_snapshot<F, T>(conn: &Connection, f: F) -> RegulaResult<T>
where
    F: FnOnce(&Connection) -> RegulaResult<T>,
{
    conn.execute_batch("BEGIN DEFERRED")
        .map_err(|e| to_storage_err(format!("snapshot begin: {e}")))?;

    match f(conn) {
        Ok(value) => {
            conn.execute_batch("COMMIT")
                .map_err(|e| to_storage_err(format!("snapshot commit: {e}")))?;
            Ok(value)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}
