//! Shared fixtures for Regula integration tests: corpus files on disk and
//! builders for rules, vectors, and records.
//!
//! Helpers panic on bad fixtures; they are for tests only.

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use regula_core::models::rule_metadata;
use regula_core::{EmbeddingRecord, Rule};

/// Directory holding the fixture corpora.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("corpora")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// The `rules` array of a JSON corpus fixture.
pub fn load_rules(relative_path: &str) -> Vec<Rule> {
    #[derive(serde::Deserialize)]
    struct Doc {
        rules: Vec<Rule>,
    }
    load_fixture::<Doc>(relative_path).rules
}

/// A complete rule.
pub fn rule(rule_id: &str, category: &str, slide: &str) -> Rule {
    Rule::new(
        rule_id,
        category,
        format!("{category} rule {rule_id}"),
        format!("Requirement {rule_id} for {category} content on slide {slide}"),
    )
    .with_slide(slide)
}

/// The three-rule scenario: one rule for any slide, two rules for slide 3.
pub fn scenario_rules() -> Vec<Rule> {
    vec![
        rule("RG.1", "disclosures", "any"),
        rule("RG.2", "disclosures", "3"),
        rule("RG.3", "structure", "3"),
    ]
}

/// Unit vector along `axis`.
pub fn unit_vector(dims: usize, axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; dims];
    v[axis % dims] = 1.0;
    v
}

/// L2-normalized copy of `v`.
pub fn normalized(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm <= f32::EPSILON {
        return v.to_vec();
    }
    v.iter().map(|x| x / norm).collect()
}

/// Record for `rule` with the given vector and a document naming the rule.
pub fn record_for(rule: &Rule, vector: Vec<f32>) -> EmbeddingRecord {
    EmbeddingRecord::new(
        rule.rule_id.clone(),
        vector,
        format!("Rule ID: {}\nTitle: {}", rule.rule_id, rule.title),
        rule_metadata(rule),
    )
}

/// Records for `rules`, rule `i` on unit axis `i`.
pub fn axis_records(rules: &[Rule], dims: usize) -> Vec<EmbeddingRecord> {
    rules
        .iter()
        .enumerate()
        .map(|(i, r)| record_for(r, unit_vector(dims, i)))
        .collect()
}
