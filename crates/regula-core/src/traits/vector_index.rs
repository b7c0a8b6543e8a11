use crate::errors::RegulaResult;
use crate::models::{EmbeddingRecord, MetadataFilter, SearchHit};

/// Persistent store of embedding records with hybrid (vector + metadata) search.
pub trait IVectorIndex: Send + Sync {
    /// Replace the whole collection with `records`. Readers observe either the
    /// previous collection or the new one, never a mix.
    fn reindex(&self, records: &[EmbeddingRecord]) -> RegulaResult<()>;

    fn get(&self, rule_id: &str) -> RegulaResult<Option<EmbeddingRecord>>;

    /// All records, ordered by `rule_id`.
    fn get_all(&self) -> RegulaResult<Vec<EmbeddingRecord>>;

    /// Top `k` records by ascending cosine distance among those matching `filters`.
    /// Ties are broken by `rule_id`.
    fn search(
        &self,
        query: &[f32],
        k: usize,
        filters: Option<&MetadataFilter>,
    ) -> RegulaResult<Vec<SearchHit>>;

    fn count(&self) -> RegulaResult<usize>;

    /// Dimension established by the first non-empty reindex, if any.
    fn dimensions(&self) -> RegulaResult<Option<usize>>;

    /// Drop all records and the established dimension (model migration).
    fn reset(&self) -> RegulaResult<()>;
}
