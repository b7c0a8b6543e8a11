//! Structural checks over a loaded corpus. Diagnostics are collected and
//! returned; rules are never modified or dropped.

use std::collections::HashMap;

use tracing::warn;

use regula_core::constants::{FIELD_CATEGORY, FIELD_RULE_ID};
use regula_core::models::{ValidationIssue, ValidationWarning};
use regula_core::Rule;

/// Validate `rules` against the id `prefix`.
///
/// Per rule, at most one diagnostic per issue kind, in this order:
/// missing required fields, malformed id, duplicate id.
pub fn validate(rules: &[Rule], prefix: &str) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, rule) in rules.iter().enumerate() {
        let id = rule.rule_id.trim();
        let rule_id = (!id.is_empty()).then(|| id.to_string());
        let mut push = |issue: ValidationIssue| {
            warnings.push(ValidationWarning {
                index,
                rule_id: rule_id.clone(),
                issue,
            });
        };

        let missing = missing_fields(rule);
        if !missing.is_empty() {
            push(ValidationIssue::MissingRequiredFields { fields: missing });
        }

        if id.is_empty() {
            continue;
        }

        if !id.starts_with(prefix) {
            push(ValidationIssue::MalformedRuleId {
                expected_prefix: prefix.to_string(),
            });
        }

        match first_seen.get(id) {
            Some(&first_index) => push(ValidationIssue::DuplicateRuleId { first_index }),
            None => {
                first_seen.insert(id, index);
            }
        }
    }

    for w in &warnings {
        warn!(index = w.index, rule_id = ?w.rule_id, "corpus validation: {w}");
    }
    warnings
}

fn missing_fields(rule: &Rule) -> Vec<String> {
    [
        (FIELD_RULE_ID, &rule.rule_id),
        (FIELD_CATEGORY, &rule.category),
        ("title", &rule.title),
        ("description", &rule.description),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name.to_string())
    .collect()
}
