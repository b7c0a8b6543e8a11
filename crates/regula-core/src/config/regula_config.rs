//! Top-level Regula configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CorpusConfig, EmbeddingConfig, IndexConfig, RetrievalConfig};
use crate::errors::{RegulaError, RegulaResult};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`REGULA_*`)
/// 2. Config file (TOML)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegulaConfig {
    pub corpus: CorpusConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
}

impl RegulaConfig {
    /// Load configuration from an optional TOML file, then apply `REGULA_*`
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> RegulaResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file without env overrides.
    pub fn from_file(path: &Path) -> RegulaResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RegulaError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&raw)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> RegulaResult<Self> {
        toml::from_str(toml_str).map_err(|e| RegulaError::ConfigError(e.to_string()))
    }

    /// Apply overrides from a key lookup. `load` passes the process environment;
    /// tests pass a map.
    ///
    /// Keys: `REGULA_INDEX_PATH`, `REGULA_EMBEDDING_PROVIDER`,
    /// `REGULA_EMBEDDING_MODEL_PATH`, `REGULA_EMBEDDING_TOKENIZER_PATH`,
    /// `REGULA_EMBEDDING_DIMENSIONS`, `REGULA_OLLAMA_URL`, `REGULA_TOP_K`,
    /// `REGULA_SIMILARITY_THRESHOLD`, `REGULA_STRICT_VALIDATION`.
    /// Unparseable numeric values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("REGULA_INDEX_PATH") {
            self.index.path = val;
        }
        if let Some(val) = lookup("REGULA_EMBEDDING_PROVIDER") {
            self.embedding.provider = val;
        }
        if let Some(val) = lookup("REGULA_EMBEDDING_MODEL_PATH") {
            self.embedding.model_path = Some(val);
        }
        if let Some(val) = lookup("REGULA_EMBEDDING_TOKENIZER_PATH") {
            self.embedding.tokenizer_path = Some(val);
        }
        if let Some(val) = lookup("REGULA_EMBEDDING_DIMENSIONS") {
            if let Ok(v) = val.parse::<usize>() {
                self.embedding.dimensions = v;
            }
        }
        if let Some(val) = lookup("REGULA_OLLAMA_URL") {
            self.embedding.ollama_url = val;
        }
        if let Some(val) = lookup("REGULA_TOP_K") {
            if let Ok(v) = val.parse::<usize>() {
                self.retrieval.default_top_k = v;
            }
        }
        if let Some(val) = lookup("REGULA_SIMILARITY_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                self.retrieval.similarity_threshold = v;
            }
        }
        if let Some(val) = lookup("REGULA_STRICT_VALIDATION") {
            if let Ok(v) = val.parse::<bool>() {
                self.corpus.strict_validation = v;
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> RegulaResult<()> {
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be greater than 0"));
        }
        if self.embedding.batch_size == 0 {
            return Err(invalid("embedding.batch_size", "must be greater than 0"));
        }
        if self.embedding.max_input_chars == 0 {
            return Err(invalid("embedding.max_input_chars", "must be greater than 0"));
        }
        if self.index.path.trim().is_empty() {
            return Err(invalid("index.path", "must not be empty"));
        }
        if self.index.read_pool_size == 0 {
            return Err(invalid("index.read_pool_size", "must be greater than 0"));
        }
        if self.retrieval.default_top_k == 0 {
            return Err(invalid("retrieval.default_top_k", "must be greater than 0"));
        }
        if self.retrieval.max_results < self.retrieval.default_top_k {
            return Err(invalid(
                "retrieval.max_results",
                "must be at least retrieval.default_top_k",
            ));
        }
        if !(-1.0..=1.0).contains(&self.retrieval.similarity_threshold) {
            return Err(invalid(
                "retrieval.similarity_threshold",
                "must be between -1.0 and 1.0",
            ));
        }
        if self.corpus.rule_id_prefix.is_empty() {
            return Err(invalid("corpus.rule_id_prefix", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> RegulaError {
    RegulaError::ConfigError(format!("{field}: {message}"))
}
