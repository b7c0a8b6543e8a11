//! Structured metadata stored per indexed rule, and the exact-match filters
//! evaluated against it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::constants::{
    FIELD_CATEGORY, FIELD_KEYWORDS, FIELD_REQUIRED, FIELD_RULE_ID, FIELD_SEVERITY,
    FIELD_SLIDE_NUMBER, FILTERABLE_FIELDS, KEYWORD_DELIMITER, SLIDE_ANY,
};
use crate::errors::{RegulaError, RegulaResult};
use crate::models::Rule;

/// Metadata attached to an indexed record. Ordered so that serialization is
/// deterministic.
pub type Metadata = BTreeMap<String, String>;

/// Derive the filterable metadata for a rule.
///
/// `keywords` is present only when the rule has at least one non-blank keyword.
pub fn rule_metadata(rule: &Rule) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert(FIELD_RULE_ID.to_string(), rule.rule_id.clone());
    meta.insert(FIELD_CATEGORY.to_string(), rule.category.clone());
    meta.insert(
        FIELD_SLIDE_NUMBER.to_string(),
        rule.effective_slide().to_string(),
    );
    meta.insert(
        FIELD_SEVERITY.to_string(),
        rule.effective_severity().to_string(),
    );
    meta.insert(FIELD_REQUIRED.to_string(), rule.required.to_string());

    let keywords: Vec<&str> = rule
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        meta.insert(FIELD_KEYWORDS.to_string(), keywords.join(KEYWORD_DELIMITER));
    }
    meta
}

/// Conjunction of exact-match constraints on metadata fields.
///
/// Every entry must hold for a record to match. The `slide_number` field also
/// matches records whose slide is `"any"`, so slide-scoped queries always see
/// rules that apply to every slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFilter {
    entries: BTreeMap<String, String>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter restricted to rules applicable to `slide`.
    pub fn for_slide(slide: impl Into<String>) -> Self {
        Self::new().with(FIELD_SLIDE_NUMBER, slide)
    }

    /// Add (or replace) a constraint.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(field, value)` constraints in field order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reject filters that reference fields outside the metadata surface.
    ///
    /// # Errors
    /// Returns `InvalidArgument` naming the first unknown field.
    pub fn validate(&self) -> RegulaResult<()> {
        for field in self.entries.keys() {
            if !FILTERABLE_FIELDS.contains(&field.as_str()) {
                return Err(RegulaError::invalid_argument(format!(
                    "unknown filter field '{field}', expected one of: {}",
                    FILTERABLE_FIELDS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Whether `metadata` satisfies every constraint.
    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.entries.iter().all(|(field, expected)| {
            match metadata.get(field) {
                Some(actual) if actual == expected => true,
                Some(actual) => field == FIELD_SLIDE_NUMBER && actual == SLIDE_ANY,
                None => false,
            }
        })
    }
}

impl From<BTreeMap<String, String>> for MetadataFilter {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl From<HashMap<String, String>> for MetadataFilter {
    fn from(entries: HashMap<String, String>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataFilter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
