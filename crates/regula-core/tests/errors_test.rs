use regula_core::errors::*;

#[test]
fn not_found_carries_rule_id() {
    let err = RegulaError::NotFound {
        rule_id: "RG.42".into(),
    };
    assert!(err.to_string().contains("RG.42"));
    assert!(err.is_not_found());
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[test]
fn dimension_mismatch_carries_values() {
    let err = RegulaError::DimensionMismatch {
        expected: 384,
        actual: 768,
    };
    let msg = err.to_string();
    assert!(msg.contains("384"));
    assert!(msg.contains("768"));
    assert!(err.is_dimension_mismatch());
}

// --- From impls ---

#[test]
fn corpus_error_converts_and_keeps_code() {
    let err: RegulaError = CorpusError::EmptyCorpus {
        source_name: "rules.json".into(),
    }
    .into();
    assert!(matches!(err, RegulaError::CorpusError(_)));
    assert_eq!(err.error_code(), "EMPTY_CORPUS");

    let err: RegulaError = CorpusError::SourceNotFound {
        path: "/missing.json".into(),
    }
    .into();
    assert!(err.is_not_found());
}

#[test]
fn embedding_dimension_mismatch_maps_to_dimension_code() {
    let err: RegulaError = EmbeddingError::DimensionMismatch {
        expected: 384,
        actual: 12,
    }
    .into();
    assert!(matches!(err, RegulaError::EmbeddingError(_)));
    assert!(err.is_dimension_mismatch());
}

#[test]
fn embedding_failures_share_one_code() {
    let err: RegulaError = EmbeddingError::InferenceFailed {
        reason: "oom".into(),
    }
    .into();
    assert_eq!(err.error_code(), "EMBEDDING_ERROR");
}

#[test]
fn storage_unavailable_maps_to_index_unavailable() {
    let err: RegulaError = StorageError::Unavailable {
        path: "/ro/rules.db".into(),
        reason: "permission denied".into(),
    }
    .into();
    assert_eq!(err.error_code(), "INDEX_UNAVAILABLE");
    assert!(err.to_string().contains("permission denied"));
}

#[test]
fn serde_error_converts_to_serialization() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: RegulaError = json_err.into();
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
}

#[test]
fn coded_string_prefixes_code() {
    let err = RegulaError::invalid_argument("k must be positive");
    assert_eq!(err.coded_string(), "[INVALID_ARGUMENT] invalid argument: k must be positive");
}
