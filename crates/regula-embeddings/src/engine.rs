//! EmbeddingEngine, the entry point for regula-embeddings.
//!
//! Wraps the configured provider with input truncation, batching, caching,
//! and dimension checks. Implements `IEmbeddingProvider` so it can be used
//! anywhere a provider is expected.

use regula_core::config::EmbeddingConfig;
use regula_core::errors::{EmbeddingError, RegulaResult};
use regula_core::traits::IEmbeddingProvider;
use regula_core::Rule;
use tracing::{debug, info};

use crate::cache::L1MemoryCache;
use crate::providers;
use crate::synthesis;
use crate::vectors;

pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: Option<L1MemoryCache>,
    batch_size: usize,
    max_input_chars: usize,
}

impl EmbeddingEngine {
    /// Build the engine around the provider named in `config`.
    pub fn new(config: &EmbeddingConfig) -> RegulaResult<Self> {
        let provider = providers::create_provider(config)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Build the engine around an already constructed provider.
    pub fn with_provider(config: &EmbeddingConfig, provider: Box<dyn IEmbeddingProvider>) -> Self {
        let cache = (config.l1_cache_size > 0).then(|| L1MemoryCache::new(config.l1_cache_size));

        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            batch_size = config.batch_size,
            cache = config.l1_cache_size,
            "EmbeddingEngine initialized"
        );

        Self {
            provider,
            cache,
            batch_size: config.batch_size.max(1),
            max_input_chars: config.max_input_chars,
        }
    }

    /// Embed the synthesized document text of `rule`.
    pub fn embed_rule(&self, rule: &Rule) -> RegulaResult<Vec<f32>> {
        self.embed_one(&synthesis::synthesize(rule))
    }

    /// Embed a free-text query.
    pub fn embed_query(&self, query: &str) -> RegulaResult<Vec<f32>> {
        self.embed_one(&synthesis::synthesize_query(query))
    }

    /// Entries currently held by the L1 cache.
    pub fn cache_len(&self) -> u64 {
        self.cache.as_ref().map_or(0, L1MemoryCache::len)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn prepare<'a>(&self, text: &'a str) -> &'a str {
        vectors::truncate_chars(text, self.max_input_chars)
    }

    fn cached(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.as_ref().and_then(|c| c.get(key))
    }

    fn remember(&self, key: String, embedding: &[f32]) {
        if let Some(cache) = &self.cache {
            cache.insert(key, embedding.to_vec());
        }
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed_one(&self, text: &str) -> RegulaResult<Vec<f32>> {
        let input = self.prepare(text);
        let key = L1MemoryCache::key_for(input);
        if let Some(hit) = self.cached(&key) {
            debug!(hash = %key, "L1 cache hit");
            return Ok(hit);
        }

        let embedding = self.provider.embed_one(input)?;
        vectors::validate_dimensions(&embedding, self.provider.dimensions())?;
        self.remember(key, &embedding);
        Ok(embedding)
    }

    fn embed_batch(&self, texts: &[String]) -> RegulaResult<Vec<Vec<f32>>> {
        let inputs: Vec<&str> = texts.iter().map(|t| self.prepare(t)).collect();
        let keys: Vec<String> = inputs.iter().map(|t| L1MemoryCache::key_for(t)).collect();

        let mut results: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cached(k)).collect();
        let misses: Vec<usize> = (0..texts.len()).filter(|&i| results[i].is_none()).collect();
        debug!(
            total = texts.len(),
            misses = misses.len(),
            batch_size = self.batch_size,
            "embedding batch"
        );

        let dims = self.provider.dimensions();
        for chunk in misses.chunks(self.batch_size) {
            let batch: Vec<String> = chunk.iter().map(|&i| inputs[i].to_string()).collect();
            let embeddings = self.provider.embed_batch(&batch)?;
            if embeddings.len() != batch.len() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!(
                        "provider returned {} vectors for {} inputs",
                        embeddings.len(),
                        batch.len()
                    ),
                }
                .into());
            }
            for (&i, embedding) in chunk.iter().zip(embeddings) {
                vectors::validate_dimensions(&embedding, dims)?;
                self.remember(keys[i].clone(), &embedding);
                results[i] = Some(embedding);
            }
        }

        results
            .into_iter()
            .map(|r| {
                r.ok_or_else(|| {
                    EmbeddingError::InferenceFailed {
                        reason: "missing embedding in batch result".to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
