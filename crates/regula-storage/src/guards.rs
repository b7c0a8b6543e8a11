//! Argument checks shared by every index backend.

use regula_core::errors::{RegulaError, RegulaResult};
use regula_core::models::{EmbeddingRecord, MetadataFilter};

/// Check a reindex batch and return the dimension it establishes.
///
/// All vectors must share one non-zero length, equal to `established` when
/// the collection already has a dimension. Empty batches establish nothing.
pub fn check_records(
    records: &[EmbeddingRecord],
    established: Option<usize>,
) -> RegulaResult<Option<usize>> {
    let Some(first) = records.first() else {
        return Ok(None);
    };
    let expected = established.unwrap_or(first.dimensions());
    for record in records {
        if record.rule_id.trim().is_empty() {
            return Err(RegulaError::invalid_argument("record with blank rule_id"));
        }
        if record.vector.is_empty() {
            return Err(RegulaError::invalid_argument(format!(
                "record {} has an empty vector",
                record.rule_id
            )));
        }
        if record.dimensions() != expected {
            return Err(RegulaError::DimensionMismatch {
                expected,
                actual: record.dimensions(),
            });
        }
    }
    Ok(Some(expected))
}

/// Check search arguments against the collection's established dimension.
pub fn check_query(
    query: &[f32],
    k: usize,
    filters: Option<&MetadataFilter>,
    established: Option<usize>,
) -> RegulaResult<()> {
    if k == 0 {
        return Err(RegulaError::invalid_argument("k must be greater than 0"));
    }
    if let Some(filters) = filters {
        filters.validate()?;
    }
    if let Some(expected) = established {
        if query.len() != expected {
            return Err(RegulaError::DimensionMismatch {
                expected,
                actual: query.len(),
            });
        }
    }
    Ok(())
}
