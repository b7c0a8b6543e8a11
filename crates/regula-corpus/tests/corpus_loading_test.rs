use regula_core::errors::RegulaErrorCode;
use regula_core::models::ValidationIssue;
use regula_corpus::RuleCorpus;
use test_fixtures::fixture_path;

#[test]
fn loads_json_fixture_in_order() {
    let corpus = RuleCorpus::load(fixture_path("fund_marketing.json")).unwrap();
    assert_eq!(corpus.len(), 12);
    assert_eq!(corpus.rules()[0].rule_id, "RG.101");
    assert_eq!(corpus.rules()[11].rule_id, "RG.112");
    assert!(corpus.validate("RG.").is_empty());
}

#[test]
fn loads_toml_fixture() {
    let corpus = RuleCorpus::load(fixture_path("fund_marketing.toml")).unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.by_id("RG.201").unwrap().slide_number, "any");
    assert_eq!(corpus.by_id("RG.202").unwrap().slide_number, "4");
}

#[test]
fn missing_path_is_not_found() {
    let err = RuleCorpus::load(fixture_path("does_not_exist.json")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn empty_rules_is_empty_corpus() {
    let err = RuleCorpus::load(fixture_path("empty.json")).unwrap_err();
    assert_eq!(err.error_code(), "EMPTY_CORPUS");
}

#[test]
fn malformed_rules_still_load_and_are_diagnosed() {
    let corpus = RuleCorpus::load(fixture_path("malformed.json")).unwrap();
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.rules()[0].rule_id, "X.1");

    let warnings = corpus.validate("RG.");
    let first: Vec<_> = warnings.iter().filter(|w| w.index == 0).collect();
    assert_eq!(first.len(), 2);
    assert!(matches!(
        first[0].issue,
        ValidationIssue::MissingRequiredFields { .. }
    ));
    assert!(matches!(first[1].issue, ValidationIssue::MalformedRuleId { .. }));

    let dup: Vec<_> = warnings.iter().filter(|w| w.index == 2).collect();
    assert_eq!(dup.len(), 1);
    assert_eq!(dup[0].issue, ValidationIssue::DuplicateRuleId { first_index: 1 });

    // Validation never drops rules.
    assert_eq!(corpus.len(), 3);
}

#[test]
fn loads_from_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(
        &path,
        r#"{"rules": [{"rule_id": "RG.1", "category": "c", "title": "t", "description": "d", "slide_number": 7}]}"#,
    )
    .unwrap();
    let corpus = RuleCorpus::load(&path).unwrap();
    assert_eq!(corpus.rules()[0].slide_number, "7");
}

#[test]
fn unreadable_document_is_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(&path, "rules: - not json").unwrap();
    let err = RuleCorpus::load(&path).unwrap_err();
    assert_eq!(err.error_code(), "CORPUS_ERROR");
}

#[test]
fn statistics_over_fixture() {
    let corpus = RuleCorpus::load(fixture_path("fund_marketing.json")).unwrap();
    let stats = corpus.statistics();
    assert_eq!(stats.total, 12);
    assert_eq!(stats.by_slide["any"], 5);
    assert_eq!(stats.by_slide["4"], 4);
    assert_eq!(stats.by_category["performance"], 4);
    assert_eq!(stats.by_severity.values().sum::<usize>(), 12);
}
