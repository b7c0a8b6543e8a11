//! Corpus file to persisted index to query, through configuration.

use std::time::Duration;

use regula_core::config::RetrievalConfig;
use regula_core::models::MetadataFilter;
use regula_core::{RegulaConfig, RegulaError, Rule};
use regula_corpus::RuleCorpus;
use regula_retrieval::{apply_threshold, search_with_timeout, RetrievalEngine};
use tempfile::TempDir;
use test_fixtures::fixture_path;

fn config(dir: &TempDir) -> RegulaConfig {
    let mut config = RegulaConfig::default();
    config.index.path = dir.path().join("index").display().to_string();
    config
}

fn build(config: &RegulaConfig) -> RetrievalEngine {
    let corpus = RuleCorpus::load(fixture_path("fund_marketing.json")).unwrap();
    let engine = RetrievalEngine::open(config).unwrap();
    let report = engine
        .indexer()
        .with_config(config.corpus.clone())
        .index_corpus(&corpus)
        .unwrap();
    assert_eq!(report.indexed, 12);
    assert_eq!(report.dimensions, 384);
    assert!(report.warnings.is_empty());
    engine
}

#[test]
fn indexed_corpus_answers_queries() {
    let dir = TempDir::new().unwrap();
    let engine = build(&config(&dir));

    let hits = engine
        .search("past performance is not a reliable indicator of future results", 3, None)
        .unwrap();
    assert_eq!(hits[0].rule_id, "RG.102");
    assert_eq!(hits[0].metadata["category"], "performance");

    let hits = engine.search_for_slide("performance figures", "4", 20).unwrap();
    assert!(!hits.is_empty());
    assert!(hits
        .iter()
        .all(|h| h.metadata["slide_number"] == "4" || h.metadata["slide_number"] == "any"));
}

#[test]
fn index_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    drop(build(&config));

    let reopened = RetrievalEngine::open(&config).unwrap();
    assert_eq!(reopened.count().unwrap(), 12);
    let record = reopened.get("RG.101").unwrap();
    assert!(record.document.contains("Title: Capital at risk"));
    assert_eq!(record.vector.len(), 384);
}

#[test]
fn reopening_with_other_dimension_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir);
    drop(build(&config));

    config.embedding.dimensions = 64;
    let err = RetrievalEngine::open(&config).err().unwrap();
    assert!(err.is_dimension_mismatch());
}

#[test]
fn k_passes_through_to_the_index() {
    let dir = TempDir::new().unwrap();
    let engine = RetrievalEngine::open(&config(&dir)).unwrap();
    let rules: Vec<Rule> = (0..60)
        .map(|i| {
            Rule::new(
                format!("RG.{}", 500 + i),
                "disclosures",
                format!("Disclosure {i}"),
                format!("The fund must disclose item {i} to investors"),
            )
        })
        .collect();
    assert_eq!(engine.indexer().index_rules(&rules).unwrap().indexed, 60);
    assert_eq!(engine.config().max_results, 50);

    let query = engine.provider().embed_one("fund disclosure").unwrap();
    let direct = engine.index().search(&query, 60, None).unwrap();
    let hits = engine.search("fund disclosure", 60, None).unwrap();
    assert_eq!(direct.len(), 60);
    assert_eq!(hits.len(), 60);
    assert_eq!(
        hits.iter().map(|h| &h.rule_id).collect::<Vec<_>>(),
        direct.iter().map(|h| &h.rule_id).collect::<Vec<_>>()
    );

    assert_eq!(engine.search("fund disclosure", 100, None).unwrap().len(), 60);
}

#[test]
fn relevant_search_applies_configured_policy() {
    let dir = TempDir::new().unwrap();
    let engine = build(&config(&dir)).with_config(RetrievalConfig {
        max_results: 5,
        similarity_threshold: -1.0,
        ..RetrievalConfig::default()
    });
    assert_eq!(engine.search_relevant("fund", None).unwrap().len(), 5);
    assert_eq!(engine.search("fund", 12, None).unwrap().len(), 12);

    let strict = engine.clone().with_config(RetrievalConfig {
        similarity_threshold: 0.99,
        ..RetrievalConfig::default()
    });
    let hits = strict.search_relevant("capital at risk", None).unwrap();
    assert!(hits.iter().all(|h| h.similarity() >= 0.99));
    assert!(hits.len() < 12);
}

#[tokio::test]
async fn blank_query_is_rejected_on_every_entry_point() {
    let dir = TempDir::new().unwrap();
    let engine = build(&config(&dir));

    assert!(matches!(
        engine.search_default("  ").unwrap_err(),
        RegulaError::InvalidArgument { .. }
    ));
    assert!(matches!(
        engine.search_for_slide("", "3", 5).unwrap_err(),
        RegulaError::InvalidArgument { .. }
    ));
    assert!(matches!(
        engine.search_relevant("\t\n", None).unwrap_err(),
        RegulaError::InvalidArgument { .. }
    ));
    let err = search_with_timeout(&engine, " ", 5, None, Some(Duration::from_secs(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, RegulaError::InvalidArgument { .. }));
}

#[test]
fn threshold_filters_weak_matches() {
    let dir = TempDir::new().unwrap();
    let engine = build(&config(&dir));
    let hits = engine.search("capital at risk", 12, None).unwrap();
    assert_eq!(hits.len(), 12);

    let strict = apply_threshold(hits.clone(), 0.99);
    assert!(strict.len() < hits.len());
    assert_eq!(apply_threshold(hits.clone(), -1.0), hits);
}

#[tokio::test]
async fn async_search_with_deadline() {
    let dir = TempDir::new().unwrap();
    let engine = build(&config(&dir));
    let filters = MetadataFilter::new().with("category", "esg");
    let hits = search_with_timeout(
        &engine,
        "sustainability",
        5,
        Some(filters),
        Some(Duration::from_secs(10)),
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].rule_id, "RG.107");
}
