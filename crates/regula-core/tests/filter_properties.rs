use proptest::prelude::*;
use regula_core::models::{content_hash, rule_metadata, MetadataFilter, Rule};

fn slide() -> impl Strategy<Value = String> {
    prop_oneof![Just("any".to_string()), "[1-9]", "[a-z]{1,4}"]
}

proptest! {
    #[test]
    fn slide_filter_agrees_with_rule(rule_slide in slide(), query_slide in "[1-9]") {
        let rule = Rule::new("RG.1", "disclosures", "t", "d").with_slide(rule_slide);
        let filter = MetadataFilter::for_slide(query_slide.clone());
        prop_assert_eq!(
            filter.matches(&rule_metadata(&rule)),
            rule.applies_to_slide(&query_slide)
        );
    }

    #[test]
    fn adding_constraints_never_widens(category in "[a-z]{1,8}", other in "[a-z]{1,8}") {
        let rule = Rule::new("RG.1", category.clone(), "t", "d");
        let meta = rule_metadata(&rule);
        let narrow = MetadataFilter::new().with("category", other.clone()).with("severity", "medium");
        if narrow.matches(&meta) {
            prop_assert!(MetadataFilter::new().with("category", other).matches(&meta));
        }
        prop_assert!(MetadataFilter::new().with("category", category).matches(&meta));
    }

    #[test]
    fn content_hash_is_deterministic(text in ".{0,64}") {
        prop_assert_eq!(content_hash(&text), content_hash(&text));
        prop_assert_eq!(content_hash(&text).len(), 64);
    }
}
