//! In-memory vector index.
//!
//! Records live in an immutable snapshot behind `RwLock<Arc<_>>`. Reindex
//! builds the next snapshot without holding the lock and swaps it in, so
//! readers always see one complete collection.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info};

use regula_core::errors::RegulaResult;
use regula_core::models::{EmbeddingRecord, MetadataFilter, SearchHit};
use regula_core::traits::IVectorIndex;

use crate::scoring::{cosine_distance, top_k};
use crate::{guards, to_storage_err};

#[derive(Debug, Default)]
struct Snapshot {
    records: BTreeMap<String, EmbeddingRecord>,
    dimensions: Option<usize>,
}

#[derive(Default)]
pub struct MemoryVectorIndex {
    snapshot: RwLock<Arc<Snapshot>>,
    /// Serializes writers so check-then-swap is atomic.
    write_lock: Mutex<()>,
}

impl MemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> RegulaResult<Arc<Snapshot>> {
        self.snapshot
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|e| to_storage_err(format!("snapshot lock poisoned: {e}")))
    }

    fn install(&self, next: Snapshot) -> RegulaResult<()> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| to_storage_err(format!("snapshot lock poisoned: {e}")))?;
        *guard = Arc::new(next);
        Ok(())
    }
}

impl IVectorIndex for MemoryVectorIndex {
    fn reindex(&self, records: &[EmbeddingRecord]) -> RegulaResult<()> {
        let _writer = self
            .write_lock
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        let established = self.current()?.dimensions;
        let dimensions = guards::check_records(records, established)?.or(established);

        let records: BTreeMap<String, EmbeddingRecord> = records
            .iter()
            .map(|r| (r.rule_id.clone(), r.clone()))
            .collect();
        let count = records.len();
        self.install(Snapshot {
            records,
            dimensions,
        })?;
        info!(records = count, dims = ?dimensions, "in-memory reindex complete");
        Ok(())
    }

    fn get(&self, rule_id: &str) -> RegulaResult<Option<EmbeddingRecord>> {
        Ok(self.current()?.records.get(rule_id).cloned())
    }

    fn get_all(&self) -> RegulaResult<Vec<EmbeddingRecord>> {
        Ok(self.current()?.records.values().cloned().collect())
    }

    fn search(
        &self,
        query: &[f32],
        k: usize,
        filters: Option<&MetadataFilter>,
    ) -> RegulaResult<Vec<SearchHit>> {
        let snapshot = self.current()?;
        guards::check_query(query, k, filters, snapshot.dimensions)?;

        let scored: Vec<(f64, &EmbeddingRecord)> = snapshot
            .records
            .values()
            .filter(|r| filters.map_or(true, |f| f.matches(&r.metadata)))
            .map(|r| (cosine_distance(query, &r.vector), r))
            .collect();
        let hits: Vec<SearchHit> = top_k(scored, k, |s| s.0, |s| s.1.rule_id.as_str())
            .into_iter()
            .map(|(distance, r)| SearchHit {
                rule_id: r.rule_id.clone(),
                document: r.document.clone(),
                metadata: r.metadata.clone(),
                distance,
            })
            .collect();
        debug!(k, filters = ?filters, hits = hits.len(), "in-memory search");
        Ok(hits)
    }

    fn count(&self) -> RegulaResult<usize> {
        Ok(self.current()?.records.len())
    }

    fn dimensions(&self) -> RegulaResult<Option<usize>> {
        Ok(self.current()?.dimensions)
    }

    fn reset(&self) -> RegulaResult<()> {
        let _writer = self
            .write_lock
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        self.install(Snapshot::default())
    }
}
