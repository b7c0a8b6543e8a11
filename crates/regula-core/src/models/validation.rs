use std::fmt;

use serde::{Deserialize, Serialize};

/// A structural problem found in one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// One or more of `rule_id`, `category`, `title`, `description` is blank.
    MissingRequiredFields { fields: Vec<String> },
    /// `rule_id` does not start with the configured prefix.
    MalformedRuleId { expected_prefix: String },
    /// `rule_id` already appeared at `first_index`.
    DuplicateRuleId { first_index: usize },
}

/// Non-fatal validation diagnostic. Collected, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Position of the rule in the corpus.
    pub index: usize,
    /// The rule's id, if it has a non-blank one.
    pub rule_id: Option<String>,
    pub issue: ValidationIssue,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule_id {
            Some(id) => write!(f, "rule {id} (#{}): ", self.index)?,
            None => write!(f, "rule #{}: ", self.index)?,
        }
        match &self.issue {
            ValidationIssue::MissingRequiredFields { fields } => {
                write!(f, "missing required field(s): {}", fields.join(", "))
            }
            ValidationIssue::MalformedRuleId { expected_prefix } => {
                write!(f, "rule_id must start with '{expected_prefix}'")
            }
            ValidationIssue::DuplicateRuleId { first_index } => {
                write!(f, "duplicate rule_id, first seen at #{first_index}")
            }
        }
    }
}
