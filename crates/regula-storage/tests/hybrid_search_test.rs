//! Filtered search semantics, checked against both backends.

use regula_core::errors::RegulaError;
use regula_core::{IVectorIndex, MetadataFilter};
use regula_storage::{MemoryVectorIndex, SqliteVectorIndex};
use test_fixtures::{axis_records, normalized, record_for, rule, scenario_rules};

fn backends() -> Vec<(&'static str, Box<dyn IVectorIndex>)> {
    vec![
        ("sqlite", Box::new(SqliteVectorIndex::open_in_memory().unwrap())),
        ("memory", Box::new(MemoryVectorIndex::new())),
    ]
}

fn ids(hits: &[regula_core::SearchHit]) -> Vec<&str> {
    hits.iter().map(|h| h.rule_id.as_str()).collect()
}

#[test]
fn slide_and_category_filter_returns_applicable_disclosures() {
    for (name, index) in backends() {
        index.reindex(&axis_records(&scenario_rules(), 4)).unwrap();
        let filters = MetadataFilter::for_slide("3").with("category", "disclosures");
        let hits = index.search(&[1.0, 1.0, 1.0, 0.0], 10, Some(&filters)).unwrap();
        let mut got = ids(&hits);
        got.sort();
        assert_eq!(got, ["RG.1", "RG.2"], "backend {name}");
    }
}

#[test]
fn slide_filter_includes_any_and_excludes_other_slides() {
    let rules = vec![
        rule("RG.1", "disclosures", "any"),
        rule("RG.2", "disclosures", "3"),
        rule("RG.3", "structure", "3"),
        rule("RG.4", "structure", "4"),
    ];
    for (name, index) in backends() {
        index.reindex(&axis_records(&rules, 4)).unwrap();
        let hits = index
            .search(&[0.5, 0.5, 0.5, 0.5], 10, Some(&MetadataFilter::for_slide("3")))
            .unwrap();
        let mut got = ids(&hits);
        got.sort();
        assert_eq!(got, ["RG.1", "RG.2", "RG.3"], "backend {name}");

        let hits = index
            .search(&[0.5, 0.5, 0.5, 0.5], 10, Some(&MetadataFilter::for_slide("9")))
            .unwrap();
        assert_eq!(ids(&hits), ["RG.1"], "backend {name}");
    }
}

#[test]
fn filter_on_required_and_keywords() {
    let rules = vec![
        rule("RG.1", "disclosures", "any").with_keywords(["fees"]),
        rule("RG.2", "disclosures", "any").with_required(false),
    ];
    for (name, index) in backends() {
        index.reindex(&axis_records(&rules, 2)).unwrap();
        let f = MetadataFilter::new().with("required", "false");
        assert_eq!(ids(&index.search(&[1.0, 1.0], 5, Some(&f)).unwrap()), ["RG.2"], "{name}");
        let f = MetadataFilter::new().with("keywords", "fees");
        assert_eq!(ids(&index.search(&[1.0, 1.0], 5, Some(&f)).unwrap()), ["RG.1"], "{name}");
    }
}

#[test]
fn ranking_is_by_distance_then_id() {
    let rules: Vec<_> = ["RG.5", "RG.3", "RG.4"]
        .iter()
        .map(|id| rule(id, "c", "any"))
        .collect();
    // RG.5 and RG.3 share a vector; RG.4 is closest.
    let records = vec![
        record_for(&rules[0], vec![1.0, 0.0]),
        record_for(&rules[1], vec![1.0, 0.0]),
        record_for(&rules[2], normalized(&[1.0, 1.0])),
    ];
    for (name, index) in backends() {
        index.reindex(&records).unwrap();
        let hits = index.search(&[0.6, 0.8], 3, None).unwrap();
        assert_eq!(ids(&hits), ["RG.4", "RG.3", "RG.5"], "backend {name}");
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert!((hits[1].distance - hits[2].distance).abs() < 1e-12);
    }
}

#[test]
fn fewer_matches_than_k_returns_all_matches() {
    for (name, index) in backends() {
        index.reindex(&axis_records(&scenario_rules(), 3)).unwrap();
        let f = MetadataFilter::new().with("category", "structure");
        let hits = index.search(&[1.0, 0.0, 0.0], 50, Some(&f)).unwrap();
        assert_eq!(ids(&hits), ["RG.3"], "backend {name}");
    }
}

#[test]
fn invalid_arguments_are_rejected() {
    for (name, index) in backends() {
        index.reindex(&axis_records(&scenario_rules(), 3)).unwrap();

        let err = index.search(&[1.0, 0.0, 0.0], 0, None).unwrap_err();
        assert!(matches!(err, RegulaError::InvalidArgument { .. }), "{name}");

        let f = MetadataFilter::new().with("title", "anything");
        let err = index.search(&[1.0, 0.0, 0.0], 3, Some(&f)).unwrap_err();
        assert!(matches!(err, RegulaError::InvalidArgument { .. }), "{name}");

        let err = index.search(&[1.0, 0.0], 3, None).unwrap_err();
        assert!(err.is_dimension_mismatch(), "{name}");
    }
}

#[test]
fn hits_carry_document_and_metadata() {
    for (name, index) in backends() {
        let records = axis_records(&scenario_rules(), 3);
        index.reindex(&records).unwrap();
        let hit = &index.search(&[0.0, 0.0, 1.0], 1, None).unwrap()[0];
        assert_eq!(hit.rule_id, "RG.3", "{name}");
        assert_eq!(hit.document, records[2].document);
        assert_eq!(hit.metadata, records[2].metadata);
        assert!((hit.similarity() - 1.0).abs() < 1e-9);
    }
}
