//! The single-row index_state table.

use rusqlite::{params, Connection, OptionalExtension};

use regula_core::errors::RegulaResult;

use crate::to_storage_err;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexState {
    pub active_generation: i64,
    pub dimensions: Option<usize>,
}

pub fn load(conn: &Connection) -> RegulaResult<IndexState> {
    let row: Option<(i64, Option<i64>)> = conn
        .query_row(
            "SELECT active_generation, dimensions FROM index_state WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let (active_generation, dimensions) =
        row.ok_or_else(|| to_storage_err("index_state row missing"))?;
    Ok(IndexState {
        active_generation,
        dimensions: dimensions.map(|d| d as usize),
    })
}

/// Point readers at `generation` and record the established dimension.
pub fn activate(conn: &Connection, generation: i64, dimensions: Option<usize>) -> RegulaResult<()> {
    conn.execute(
        "UPDATE index_state
         SET active_generation = ?1,
             dimensions = ?2,
             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = 1",
        params![generation, dimensions.map(|d| d as i64)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
