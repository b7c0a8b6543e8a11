//! RuleIndexer: corpus -> documents -> vectors -> records -> reindex.
//!
//! Every step runs before the index is touched, so a failure anywhere leaves
//! the previously indexed collection in place.

use std::sync::Arc;
use std::time::Instant;

use regula_core::config::CorpusConfig;
use regula_core::errors::{CorpusError, EmbeddingError, RegulaResult};
use regula_core::models::{rule_metadata, EmbeddingRecord, Rule, ValidationWarning};
use regula_core::traits::{IEmbeddingProvider, IVectorIndex};
use regula_corpus::{validate, RuleCorpus};
use regula_embeddings::synthesize;
use regula_embeddings::vectors::validate_dimensions;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of one indexing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Records in the index after the run. Duplicate ids collapse to one.
    pub indexed: usize,
    pub warnings: Vec<ValidationWarning>,
    pub dimensions: usize,
    pub provider: String,
    pub elapsed_ms: u64,
}

pub struct RuleIndexer {
    provider: Arc<dyn IEmbeddingProvider>,
    index: Arc<dyn IVectorIndex>,
    config: CorpusConfig,
}

impl RuleIndexer {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, index: Arc<dyn IVectorIndex>) -> Self {
        Self {
            provider,
            index,
            config: CorpusConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CorpusConfig) -> Self {
        self.config = config;
        self
    }

    /// Index every rule of `corpus`, replacing the current collection.
    pub fn index_corpus(&self, corpus: &RuleCorpus) -> RegulaResult<IndexReport> {
        self.index_rules(corpus.rules())
    }

    /// Index `rules`, replacing the current collection.
    ///
    /// # Errors
    /// `CorpusError::ValidationFailed` in strict mode when validation reports
    /// anything. Embedding failures and dimension mismatches propagate, and in
    /// every error case the index is left unchanged.
    pub fn index_rules(&self, rules: &[Rule]) -> RegulaResult<IndexReport> {
        let started = Instant::now();

        let warnings = validate(rules, &self.config.rule_id_prefix);
        if self.config.strict_validation && !warnings.is_empty() {
            warn!(warnings = warnings.len(), "strict validation rejected corpus");
            return Err(CorpusError::ValidationFailed {
                count: warnings.len(),
            }
            .into());
        }

        let documents: Vec<String> = rules.iter().map(synthesize).collect();
        let vectors = self.provider.embed_batch(&documents)?;
        if vectors.len() != documents.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "provider returned {} vectors for {} documents",
                    vectors.len(),
                    documents.len()
                ),
            }
            .into());
        }
        let dimensions = self.provider.dimensions();
        for vector in &vectors {
            validate_dimensions(vector, dimensions)?;
        }
        debug!(documents = documents.len(), dims = dimensions, "rules embedded");

        let records: Vec<EmbeddingRecord> = rules
            .iter()
            .zip(documents)
            .zip(vectors)
            .map(|((rule, document), vector)| {
                EmbeddingRecord::new(rule.rule_id.clone(), vector, document, rule_metadata(rule))
            })
            .collect();

        self.index.reindex(&records)?;
        let indexed = self.index.count()?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            rules = rules.len(),
            indexed,
            warnings = warnings.len(),
            dims = dimensions,
            provider = self.provider.name(),
            elapsed_ms,
            "index run complete"
        );

        Ok(IndexReport {
            indexed,
            warnings,
            dimensions,
            provider: self.provider.name().to_string(),
            elapsed_ms,
        })
    }
}
