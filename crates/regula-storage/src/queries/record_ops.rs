//! Record reads and generation staging.

use rusqlite::{params, Connection, OptionalExtension, Row};

use regula_core::errors::{RegulaResult, StorageError};
use regula_core::models::{EmbeddingRecord, Metadata};

use super::ACTIVE_GENERATION;
use crate::blob::{bytes_to_f32_vec, f32_vec_to_bytes};
use crate::to_storage_err;

const RECORD_COLUMNS: &str = "rule_id, embedding, dimensions, document, content_hash, metadata";

/// Write `records` as `generation`. A later record with the same id replaces
/// an earlier one.
pub fn insert_generation(
    conn: &Connection,
    generation: i64,
    records: &[EmbeddingRecord],
) -> RegulaResult<usize> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO rule_records
                (generation, rule_id, embedding, dimensions, document, content_hash, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(generation, rule_id) DO UPDATE SET
                embedding = excluded.embedding,
                dimensions = excluded.dimensions,
                document = excluded.document,
                content_hash = excluded.content_hash,
                metadata = excluded.metadata",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for record in records {
        let metadata = serde_json::to_string(&record.metadata)?;
        stmt.execute(params![
            generation,
            record.rule_id,
            f32_vec_to_bytes(&record.vector),
            record.dimensions() as i64,
            record.document,
            record.content_hash,
            metadata,
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }

    count_generation(conn, generation)
}

/// Delete every generation other than `keep`.
pub fn delete_other_generations(conn: &Connection, keep: i64) -> RegulaResult<usize> {
    conn.execute("DELETE FROM rule_records WHERE generation != ?1", params![keep])
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_generation(conn: &Connection, generation: i64) -> RegulaResult<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM rule_records WHERE generation = ?1",
        params![generation],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_active(conn: &Connection) -> RegulaResult<usize> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM rule_records WHERE generation = {ACTIVE_GENERATION}"),
        [],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn get_record(conn: &Connection, rule_id: &str) -> RegulaResult<Option<EmbeddingRecord>> {
    let raw = conn
        .query_row(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM rule_records
                 WHERE generation = {ACTIVE_GENERATION} AND rule_id = ?1"
            ),
            params![rule_id],
            RawRecord::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawRecord::into_record).transpose()
}

/// All active records ordered by `rule_id`.
pub fn get_all(conn: &Connection) -> RegulaResult<Vec<EmbeddingRecord>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM rule_records
             WHERE generation = {ACTIVE_GENERATION}
             ORDER BY rule_id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], RawRecord::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        records.push(raw.into_record()?);
    }
    Ok(records)
}

/// A row as stored, before decoding.
struct RawRecord {
    rule_id: String,
    embedding: Vec<u8>,
    dimensions: i64,
    document: String,
    content_hash: String,
    metadata: String,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            rule_id: row.get(0)?,
            embedding: row.get(1)?,
            dimensions: row.get(2)?,
            document: row.get(3)?,
            content_hash: row.get(4)?,
            metadata: row.get(5)?,
        })
    }

    fn into_record(self) -> RegulaResult<EmbeddingRecord> {
        let vector = bytes_to_f32_vec(&self.rule_id, &self.embedding, self.dimensions as usize)?;
        let metadata = parse_metadata(&self.rule_id, &self.metadata)?;
        Ok(EmbeddingRecord {
            rule_id: self.rule_id,
            vector,
            document: self.document,
            content_hash: self.content_hash,
            metadata,
        })
    }
}

pub(crate) fn parse_metadata(rule_id: &str, raw: &str) -> RegulaResult<Metadata> {
    serde_json::from_str(raw).map_err(|e| {
        StorageError::CorruptRecord {
            rule_id: rule_id.to_string(),
            reason: format!("metadata is not a JSON string map: {e}"),
        }
        .into()
    })
}
