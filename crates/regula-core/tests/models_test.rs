use regula_core::models::*;

#[test]
fn record_hashes_document() {
    let rule = Rule::new("RG.1", "disclosures", "Risk warning", "Show the risk warning");
    let record = EmbeddingRecord::new("RG.1", vec![0.1, 0.2], "doc text", rule_metadata(&rule));
    assert_eq!(record.content_hash, content_hash("doc text"));
    assert_eq!(record.content_hash.len(), 64);
    assert_eq!(record.dimensions(), 2);
}

#[test]
fn hit_similarity_is_complement_of_distance() {
    let hit = SearchHit {
        rule_id: "RG.1".into(),
        document: String::new(),
        metadata: Metadata::new(),
        distance: 0.25,
    };
    assert!((hit.similarity() - 0.75).abs() < 1e-12);
}

#[test]
fn validation_warning_display_names_rule_and_issue() {
    let w = ValidationWarning {
        index: 3,
        rule_id: Some("X.1".into()),
        issue: ValidationIssue::MalformedRuleId {
            expected_prefix: "RG.".into(),
        },
    };
    let msg = w.to_string();
    assert!(msg.contains("X.1"));
    assert!(msg.contains("RG."));

    let w = ValidationWarning {
        index: 0,
        rule_id: None,
        issue: ValidationIssue::MissingRequiredFields {
            fields: vec!["rule_id".into(), "description".into()],
        },
    };
    assert!(w.to_string().contains("rule_id, description"));
}

#[test]
fn filter_deserializes_from_plain_map() {
    let f: MetadataFilter =
        serde_json::from_str(r#"{"slide_number": "3", "category": "disclosures"}"#).unwrap();
    assert_eq!(f.len(), 2);
    assert_eq!(f.get("slide_number"), Some("3"));
}

#[test]
fn rule_loads_from_toml() {
    let rule: Rule = toml::from_str(
        r#"
        rule_id = "RG.12"
        category = "performance"
        title = "Past performance"
        description = "Past performance must carry a warning"
        slide_number = 5
        keywords = ["past", "performance"]
        "#,
    )
    .unwrap();
    assert_eq!(rule.slide_number, "5");
    assert_eq!(rule.keywords.len(), 2);
    assert!(rule.required);
}
