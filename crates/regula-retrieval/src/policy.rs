//! Caller-level result policies. The index never applies these itself.

use regula_core::models::SearchHit;

/// Keep hits whose cosine similarity (`1 - distance`) is at least
/// `min_similarity`. Order is preserved.
pub fn apply_threshold(hits: Vec<SearchHit>, min_similarity: f64) -> Vec<SearchHit> {
    hits.into_iter()
        .filter(|hit| hit.similarity() >= min_similarity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regula_core::models::Metadata;

    fn hit(id: &str, distance: f64) -> SearchHit {
        SearchHit {
            rule_id: id.to_string(),
            document: String::new(),
            metadata: Metadata::new(),
            distance,
        }
    }

    #[test]
    fn drops_hits_below_threshold() {
        let hits = vec![hit("RG.1", 0.1), hit("RG.2", 0.25), hit("RG.3", 0.6)];
        let kept = apply_threshold(hits, 0.7);
        let ids: Vec<&str> = kept.iter().map(|h| h.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["RG.1", "RG.2"]);
    }

    #[test]
    fn boundary_is_inclusive() {
        let kept = apply_threshold(vec![hit("RG.1", 0.5)], 0.5);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn negative_threshold_keeps_everything() {
        let hits = vec![hit("RG.1", 0.0), hit("RG.2", 2.0)];
        assert_eq!(apply_threshold(hits, -1.0).len(), 2);
    }
}
