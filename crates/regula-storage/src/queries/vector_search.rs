//! Filtered exact cosine search.
//!
//! Metadata filters run in SQL via `json_extract` over the stored metadata
//! JSON; ranking is a cosine scan in Rust over the rows that pass.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use regula_core::constants::{FIELD_SLIDE_NUMBER, SLIDE_ANY};
use regula_core::errors::{RegulaError, RegulaResult};
use regula_core::models::{MetadataFilter, SearchHit};

use super::record_ops::parse_metadata;
use super::ACTIVE_GENERATION;
use crate::blob::bytes_to_f32_vec;
use crate::scoring::{cosine_distance, top_k};
use crate::to_storage_err;

/// Build the WHERE clause for `filters` (already validated against the
/// filterable field set) and its bound values.
pub fn filter_clause(filters: Option<&MetadataFilter>) -> (String, Vec<Value>) {
    let mut clause = format!("generation = {ACTIVE_GENERATION}");
    let mut values = Vec::new();
    if let Some(filters) = filters {
        for (field, expected) in filters.entries() {
            values.push(Value::Text(expected.to_string()));
            let n = values.len();
            let column = format!("json_extract(metadata, '$.{field}')");
            if field == FIELD_SLIDE_NUMBER {
                clause.push_str(&format!(
                    " AND ({column} = ?{n} OR {column} = '{SLIDE_ANY}')"
                ));
            } else {
                clause.push_str(&format!(" AND {column} = ?{n}"));
            }
        }
    }
    (clause, values)
}

/// Top `k` active records matching `filters` by ascending cosine distance
/// to `query`, ties broken by `rule_id`.
///
/// # Errors
/// `DimensionMismatch` if a stored vector differs in length from `query`.
pub fn search(
    conn: &Connection,
    query: &[f32],
    k: usize,
    filters: Option<&MetadataFilter>,
) -> RegulaResult<Vec<SearchHit>> {
    let (clause, values) = filter_clause(filters);
    let sql = format!(
        "SELECT rule_id, embedding, dimensions, document, metadata
         FROM rule_records WHERE {clause}"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(values), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(f64, String, String, String)> = Vec::new();
    for row in rows {
        let (rule_id, blob, dims, document, metadata) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let vector = bytes_to_f32_vec(&rule_id, &blob, dims as usize)?;
        if vector.len() != query.len() {
            return Err(RegulaError::DimensionMismatch {
                expected: vector.len(),
                actual: query.len(),
            });
        }
        let distance = cosine_distance(query, &vector);
        scored.push((distance, rule_id, document, metadata));
    }

    let ranked = top_k(scored, k, |s| s.0, |s| s.1.as_str());
    ranked
        .into_iter()
        .map(|(distance, rule_id, document, metadata)| {
            let metadata = parse_metadata(&rule_id, &metadata)?;
            Ok(SearchHit {
                rule_id,
                document,
                metadata,
                distance,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use crate::queries::{index_state, record_ops};
    use regula_core::models::EmbeddingRecord;

    fn seeded(vectors: &[(&str, Vec<f32>)]) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let records: Vec<EmbeddingRecord> = vectors
            .iter()
            .map(|(id, v)| EmbeddingRecord::new(*id, v.clone(), "doc", Default::default()))
            .collect();
        record_ops::insert_generation(&conn, 1, &records).unwrap();
        index_state::activate(&conn, 1, Some(3)).unwrap();
        conn
    }

    #[test]
    fn ranks_active_records() {
        let conn = seeded(&[("RG.1", vec![1.0, 0.0, 0.0]), ("RG.2", vec![0.0, 1.0, 0.0])]);
        let hits = search(&conn, &[0.0, 1.0, 0.0], 2, None).unwrap();
        assert_eq!(hits[0].rule_id, "RG.2");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn short_query_is_a_dimension_mismatch() {
        let conn = seeded(&[("RG.1", vec![1.0, 0.0, 0.0])]);
        let err = search(&conn, &[1.0, 0.0], 1, None).unwrap_err();
        assert!(matches!(
            err,
            RegulaError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn no_filters_selects_active_generation() {
        let (clause, values) = filter_clause(None);
        assert!(clause.starts_with("generation = "));
        assert!(values.is_empty());
    }

    #[test]
    fn slide_filter_admits_any() {
        let f = MetadataFilter::for_slide("3").with("category", "disclosures");
        let (clause, values) = filter_clause(Some(&f));
        assert_eq!(values.len(), 2);
        assert!(clause.contains("json_extract(metadata, '$.category') = ?1"));
        assert!(clause.contains("json_extract(metadata, '$.slide_number') = 'any'"));
        assert!(clause.contains("json_extract(metadata, '$.slide_number') = ?2"));
    }
}
