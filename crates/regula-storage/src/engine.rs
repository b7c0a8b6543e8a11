//! SqliteVectorIndex: owns the connection pool, runs migrations on open, and
//! implements `IVectorIndex` over the active generation of records.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use regula_core::config::IndexConfig;
use regula_core::errors::RegulaResult;
use regula_core::models::{EmbeddingRecord, MetadataFilter, SearchHit};
use regula_core::traits::IVectorIndex;

use crate::pool::{pragmas, ConnectionPool, ReadPool};
use crate::queries::{index_state, read_snapshot, record_ops, vector_search};
use crate::{guards, migrations, to_storage_err, to_unavailable};

/// Persistent vector index stored in one SQLite file.
pub struct SqliteVectorIndex {
    pool: ConnectionPool,
}

impl SqliteVectorIndex {
    /// Open (creating if needed) the index directory `config.path` and the
    /// database file inside it.
    ///
    /// # Errors
    /// `StorageError::Unavailable` if the directory or database cannot be
    /// created or opened.
    pub fn open(config: &IndexConfig) -> RegulaResult<Self> {
        let dir = Path::new(&config.path);
        std::fs::create_dir_all(dir)
            .map_err(|e| to_unavailable(dir.display().to_string(), e.to_string()))?;
        let db_path = config.db_path();
        let pool = ConnectionPool::open(&db_path, config, migrations::run_migrations)?;
        let index = Self { pool };
        let state = index.pool.with_reader(index_state::load)?;
        let wal = index.pool.writer.with_conn(pragmas::verify_wal_mode)?;
        info!(
            path = %db_path.display(),
            dims = ?state.dimensions,
            generation = state.active_generation,
            readers = index.pool.readers.as_ref().map_or(0, ReadPool::size),
            wal,
            "vector index opened"
        );
        Ok(index)
    }

    /// Open the index in directory `dir` with default settings.
    pub fn open_dir(dir: impl AsRef<Path>) -> RegulaResult<Self> {
        Self::open(&IndexConfig::at(dir.as_ref().to_string_lossy().into_owned()))
    }

    /// Open an in-memory index (for testing). Reads go through the writer.
    pub fn open_in_memory() -> RegulaResult<Self> {
        let pool = ConnectionPool::open_in_memory(migrations::run_migrations)?;
        Ok(Self { pool })
    }

    /// Database file path, `None` for in-memory indexes.
    pub fn db_path(&self) -> Option<&PathBuf> {
        self.pool.db_path.as_ref()
    }

    pub fn schema_version(&self) -> RegulaResult<u32> {
        self.pool.writer.with_conn(migrations::current_version)
    }

    /// Stage `records` as a new generation and make it active, all in one
    /// IMMEDIATE transaction.
    fn swap_generation(
        conn: &Connection,
        records: &[EmbeddingRecord],
        dimensions: Option<usize>,
    ) -> RegulaResult<(i64, usize)> {
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| to_storage_err(format!("reindex begin: {e}")))?;

        match Self::swap_generation_inner(conn, records, dimensions) {
            Ok(outcome) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| to_storage_err(format!("reindex commit: {e}")))?;
                Ok(outcome)
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }

    fn swap_generation_inner(
        conn: &Connection,
        records: &[EmbeddingRecord],
        dimensions: Option<usize>,
    ) -> RegulaResult<(i64, usize)> {
        let state = index_state::load(conn)?;
        let generation = state.active_generation + 1;
        let stored = record_ops::insert_generation(conn, generation, records)?;
        index_state::activate(conn, generation, dimensions)?;
        let removed = record_ops::delete_other_generations(conn, generation)?;
        debug!(generation, stored, removed, "generation swapped");
        Ok((generation, stored))
    }
}

impl IVectorIndex for SqliteVectorIndex {
    fn reindex(&self, records: &[EmbeddingRecord]) -> RegulaResult<()> {
        self.pool.writer.with_conn(|conn| {
            let state = index_state::load(conn)?;
            let dimensions = guards::check_records(records, state.dimensions)?
                .or(state.dimensions);
            let (generation, stored) = Self::swap_generation(conn, records, dimensions)?;
            info!(
                generation,
                records = stored,
                dims = ?dimensions,
                "reindex complete"
            );
            Ok(())
        })
    }

    fn get(&self, rule_id: &str) -> RegulaResult<Option<EmbeddingRecord>> {
        self.pool
            .with_reader(|conn| record_ops::get_record(conn, rule_id))
    }

    fn get_all(&self) -> RegulaResult<Vec<EmbeddingRecord>> {
        self.pool.with_reader(record_ops::get_all)
    }

    fn search(
        &self,
        query: &[f32],
        k: usize,
        filters: Option<&MetadataFilter>,
    ) -> RegulaResult<Vec<SearchHit>> {
        self.pool.with_reader(|conn| {
            read_snapshot(conn, |conn| {
                let state = index_state::load(conn)?;
                guards::check_query(query, k, filters, state.dimensions)?;
                let hits = vector_search::search(conn, query, k, filters)?;
                debug!(k, filters = ?filters, hits = hits.len(), "vector search");
                Ok(hits)
            })
        })
    }

    fn count(&self) -> RegulaResult<usize> {
        self.pool.with_reader(record_ops::count_active)
    }

    fn dimensions(&self) -> RegulaResult<Option<usize>> {
        self.pool
            .with_reader(|conn| Ok(index_state::load(conn)?.dimensions))
    }

    fn reset(&self) -> RegulaResult<()> {
        self.pool.writer.with_conn(|conn| {
            Self::swap_generation(conn, &[], None)?;
            info!("vector index reset");
            Ok(())
        })
    }
}
