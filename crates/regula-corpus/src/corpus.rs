//! The in-memory rule corpus.

use std::path::Path;

use tracing::info;

use regula_core::errors::{CorpusError, RegulaResult};
use regula_core::models::{CorpusStatistics, ValidationWarning};
use regula_core::Rule;

use crate::loader::{self, CorpusFormat};
use crate::{statistics, validation};

/// A non-empty, ordered collection of rules.
///
/// Corpus order is preserved by every accessor.
#[derive(Debug, Clone)]
pub struct RuleCorpus {
    rules: Vec<Rule>,
}

impl RuleCorpus {
    /// Load a corpus document (`{ "rules": [...] }`) from `path`.
    ///
    /// # Errors
    /// `SourceNotFound` if the path does not exist, `EmptyCorpus` if the
    /// document has no rules, `ParseFailed` for malformed documents.
    pub fn load(path: impl AsRef<Path>) -> RegulaResult<Self> {
        let path = path.as_ref();
        let rules = loader::read(path)?;
        info!(path = %path.display(), rules = rules.len(), "rule corpus loaded");
        Ok(Self { rules })
    }

    pub fn from_json_str(raw: &str) -> RegulaResult<Self> {
        let rules = loader::parse(raw, CorpusFormat::Json, "<inline json>")?;
        Ok(Self { rules })
    }

    pub fn from_toml_str(raw: &str) -> RegulaResult<Self> {
        let rules = loader::parse(raw, CorpusFormat::Toml, "<inline toml>")?;
        Ok(Self { rules })
    }

    /// Wrap already-built rules. An empty vector is an `EmptyCorpus` error.
    pub fn from_rules(rules: Vec<Rule>) -> RegulaResult<Self> {
        if rules.is_empty() {
            return Err(CorpusError::EmptyCorpus {
                source_name: "<in-memory>".to_string(),
            }
            .into());
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a constructed corpus.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Structural diagnostics; see [`validation::validate`].
    pub fn validate(&self, prefix: &str) -> Vec<ValidationWarning> {
        validation::validate(&self.rules, prefix)
    }

    pub fn by_category(&self, category: &str) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.category == category).collect()
    }

    /// Rules for `slide`, including those that apply to any slide.
    pub fn by_slide(&self, slide: &str) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|r| r.applies_to_slide(slide))
            .collect()
    }

    pub fn by_severity(&self, severity: &str) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|r| r.effective_severity() == severity)
            .collect()
    }

    /// First rule with `rule_id`.
    pub fn by_id(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.rule_id == rule_id)
    }

    pub fn statistics(&self) -> CorpusStatistics {
        statistics::compute(&self.rules)
    }
}
