//! The compliance rule, the unit of knowledge the engine retrieves.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_SEVERITY, SLIDE_ANY};

/// A regulatory rule as it appears in the corpus.
///
/// Deserialization is lenient: missing or `null` fields fall back to their
/// defaults so that structurally broken rules still load and can be reported
/// by validation instead of failing the whole corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub source_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub references: Vec<String>,
    /// Concrete slide id, or `"any"` for rules that apply to every slide.
    #[serde(default = "default_slide", deserialize_with = "slide_id")]
    pub slide_number: String,
    #[serde(default = "default_severity", deserialize_with = "severity")]
    pub severity: String,
    #[serde(default = "default_required", deserialize_with = "lenient_required")]
    pub required: bool,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            rule_id: String::new(),
            category: String::new(),
            title: String::new(),
            description: String::new(),
            keywords: Vec::new(),
            source_text: None,
            references: Vec::new(),
            slide_number: default_slide(),
            severity: default_severity(),
            required: default_required(),
        }
    }
}

impl Rule {
    /// Create a rule with the four required fields; everything else defaulted.
    pub fn new(
        rule_id: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category: category.into(),
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_slide(mut self, slide: impl Into<String>) -> Self {
        self.slide_number = slide.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source_text(mut self, source_text: impl Into<String>) -> Self {
        self.source_text = Some(source_text.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Whether this rule applies to `slide`: exact match or the `"any"` sentinel.
    /// Compares the effective slide, the same value indexing stores.
    pub fn applies_to_slide(&self, slide: &str) -> bool {
        let own = self.effective_slide();
        own == SLIDE_ANY || own == slide
    }

    /// Severity with blank values mapped to the default.
    pub fn effective_severity(&self) -> &str {
        let trimmed = self.severity.trim();
        if trimmed.is_empty() {
            DEFAULT_SEVERITY
        } else {
            trimmed
        }
    }

    /// Slide with blank values mapped to `"any"`.
    pub fn effective_slide(&self) -> &str {
        let trimmed = self.slide_number.trim();
        if trimmed.is_empty() {
            SLIDE_ANY
        } else {
            trimmed
        }
    }
}

fn default_slide() -> String {
    SLIDE_ANY.to_string()
}

fn default_severity() -> String {
    DEFAULT_SEVERITY.to_string()
}

fn default_required() -> bool {
    true
}

/// Scalar values a corpus may carry where a string is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                (f as i64).to_string()
            }
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrOne {
    List(Vec<Option<Scalar>>),
    One(Scalar),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_string).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_string))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<ListOrOne> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(ListOrOne::One(s)) => vec![s.into_string()],
        Some(ListOrOne::List(items)) => items
            .into_iter()
            .flatten()
            .map(Scalar::into_string)
            .collect(),
    })
}

fn slide_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    let slide = value.map(Scalar::into_string).unwrap_or_default();
    let trimmed = slide.trim();
    Ok(if trimmed.is_empty() {
        default_slide()
    } else {
        trimmed.to_string()
    })
}

fn severity<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    let severity = value.map(Scalar::into_string).unwrap_or_default();
    let trimmed = severity.trim();
    Ok(if trimmed.is_empty() {
        default_severity()
    } else {
        trimmed.to_string()
    })
}

fn lenient_required<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => default_required(),
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Int(n)) => n != 0,
        Some(Scalar::Float(f)) => f != 0.0,
        Some(Scalar::Str(s)) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "false" | "no" | "0" | "optional"
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let rule: Rule = serde_json::from_str(r#"{"rule_id": "RG.1"}"#).unwrap();
        assert_eq!(rule.rule_id, "RG.1");
        assert_eq!(rule.slide_number, "any");
        assert_eq!(rule.severity, "medium");
        assert!(rule.required);
        assert!(rule.keywords.is_empty());
        assert!(rule.source_text.is_none());
    }

    #[test]
    fn nulls_take_defaults() {
        let rule: Rule = serde_json::from_str(
            r#"{"rule_id": "RG.2", "keywords": null, "severity": null, "slide_number": null, "required": null}"#,
        )
        .unwrap();
        assert_eq!(rule.slide_number, "any");
        assert_eq!(rule.severity, "medium");
        assert!(rule.required);
        assert!(rule.keywords.is_empty());
    }

    #[test]
    fn numeric_slide_becomes_string() {
        let rule: Rule = serde_json::from_str(r#"{"rule_id": "RG.3", "slide_number": 4}"#).unwrap();
        assert_eq!(rule.slide_number, "4");
        let rule: Rule =
            serde_json::from_str(r#"{"rule_id": "RG.3", "slide_number": 4.0}"#).unwrap();
        assert_eq!(rule.slide_number, "4");
    }

    #[test]
    fn single_keyword_string_becomes_list() {
        let rule: Rule =
            serde_json::from_str(r#"{"rule_id": "RG.4", "keywords": "performance"}"#).unwrap();
        assert_eq!(rule.keywords, vec!["performance"]);
    }

    #[test]
    fn required_accepts_strings() {
        let rule: Rule =
            serde_json::from_str(r#"{"rule_id": "RG.5", "required": "false"}"#).unwrap();
        assert!(!rule.required);
        let rule: Rule =
            serde_json::from_str(r#"{"rule_id": "RG.5", "required": "yes"}"#).unwrap();
        assert!(rule.required);
    }

    #[test]
    fn any_slide_applies_everywhere() {
        let rule = Rule::new("RG.1", "disclosures", "t", "d");
        assert!(rule.applies_to_slide("1"));
        assert!(rule.applies_to_slide("never-seen"));
        let scoped = rule.with_slide("3");
        assert!(scoped.applies_to_slide("3"));
        assert!(!scoped.applies_to_slide("4"));
    }

    #[test]
    fn blank_builder_slide_applies_everywhere() {
        let rule = Rule::new("RG.1", "disclosures", "t", "d").with_slide("  ");
        assert!(rule.applies_to_slide("3"));
        let padded = Rule::new("RG.2", "disclosures", "t", "d").with_slide(" 3 ");
        assert!(padded.applies_to_slide("3"));
        assert!(!padded.applies_to_slide("4"));
    }

    #[test]
    fn serialize_roundtrip_is_stable() {
        let rule = Rule::new("RG.9", "structure", "Title", "Body")
            .with_keywords(["a", "b"])
            .with_slide("2")
            .with_required(false);
        let json = serde_json::to_string(&rule).unwrap();
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
