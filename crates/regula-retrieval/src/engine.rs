//! RetrievalEngine: embeds query text and delegates ranking to the index.

use std::sync::Arc;

use regula_core::config::RetrievalConfig;
use regula_core::constants::FIELD_SLIDE_NUMBER;
use regula_core::errors::{RegulaError, RegulaResult};
use regula_core::models::{EmbeddingRecord, MetadataFilter, SearchHit};
use regula_core::traits::{IEmbeddingProvider, IVectorIndex};
use regula_core::RegulaConfig;
use regula_embeddings::{synthesize_query, EmbeddingEngine};
use regula_storage::SqliteVectorIndex;
use tracing::{debug, info};

use crate::indexer::RuleIndexer;
use crate::policy::apply_threshold;

/// Query facade over one embedding provider and one vector index.
///
/// Cheap to clone: both backends are shared behind `Arc`.
#[derive(Clone)]
pub struct RetrievalEngine {
    provider: Arc<dyn IEmbeddingProvider>,
    index: Arc<dyn IVectorIndex>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    /// Pair `provider` with `index` under the default retrieval config.
    ///
    /// # Errors
    /// `DimensionMismatch` if the index already holds vectors of a different
    /// dimension than the provider produces.
    pub fn new(
        provider: Arc<dyn IEmbeddingProvider>,
        index: Arc<dyn IVectorIndex>,
    ) -> RegulaResult<Self> {
        if let Some(established) = index.dimensions()? {
            if established != provider.dimensions() {
                return Err(RegulaError::DimensionMismatch {
                    expected: established,
                    actual: provider.dimensions(),
                });
            }
        }
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            "RetrievalEngine initialized"
        );
        Ok(Self {
            provider,
            index,
            config: RetrievalConfig::default(),
        })
    }

    /// Build the full stack from configuration: an `EmbeddingEngine` around
    /// the configured provider and a `SqliteVectorIndex` at `index.path`.
    pub fn open(config: &RegulaConfig) -> RegulaResult<Self> {
        let provider: Arc<dyn IEmbeddingProvider> =
            Arc::new(EmbeddingEngine::new(&config.embedding)?);
        let index: Arc<dyn IVectorIndex> = Arc::new(SqliteVectorIndex::open(&config.index)?);
        Ok(Self::new(provider, index)?.with_config(config.retrieval.clone()))
    }

    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<dyn IEmbeddingProvider> {
        &self.provider
    }

    pub fn index(&self) -> &Arc<dyn IVectorIndex> {
        &self.index
    }

    /// An indexer writing into the same index with the same provider.
    pub fn indexer(&self) -> RuleIndexer {
        RuleIndexer::new(Arc::clone(&self.provider), Arc::clone(&self.index))
    }

    /// Top `k` rules for `query_text`, restricted by `filters`.
    ///
    /// `k` goes to the index unchanged: when fewer than `k` rules match, all
    /// matches are returned. An empty index returns no hits.
    ///
    /// # Errors
    /// `InvalidArgument` for `k == 0`, for an unknown filter field, and for
    /// query text that is empty or whitespace only (it has no content to
    /// embed). Embedding and index failures propagate unchanged.
    pub fn search(
        &self,
        query_text: &str,
        k: usize,
        filters: Option<&MetadataFilter>,
    ) -> RegulaResult<Vec<SearchHit>> {
        if k == 0 {
            return Err(RegulaError::invalid_argument("k must be positive"));
        }
        let query = synthesize_query(query_text);
        if query.is_empty() {
            return Err(RegulaError::invalid_argument("query text must not be blank"));
        }
        if let Some(filters) = filters {
            filters.validate()?;
        }

        let vector = self.provider.embed_one(&query)?;
        let hits = self.index.search(&vector, k, filters)?;

        debug!(
            k,
            filters = filters.map_or(0, MetadataFilter::len),
            hits = hits.len(),
            best = ?hits.first().map(|h| h.rule_id.as_str()),
            "search complete"
        );
        Ok(hits)
    }

    /// [`search`](Self::search) with `default_top_k` and no filters.
    ///
    /// # Errors
    /// Same as [`search`](Self::search), including blank query text.
    pub fn search_default(&self, query_text: &str) -> RegulaResult<Vec<SearchHit>> {
        self.search(query_text, self.config.default_top_k, None)
    }

    /// Rules for `slide_id`, including those that apply to every slide.
    ///
    /// # Errors
    /// Same as [`search`](Self::search), including blank query text.
    pub fn search_for_slide(
        &self,
        query_text: &str,
        slide_id: &str,
        k: usize,
    ) -> RegulaResult<Vec<SearchHit>> {
        let filters = MetadataFilter::new().with(FIELD_SLIDE_NUMBER, slide_id);
        self.search(query_text, k, Some(&filters))
    }

    /// Up to `max_results` rules whose similarity reaches
    /// `similarity_threshold`, best first.
    ///
    /// # Errors
    /// Same as [`search`](Self::search), including blank query text.
    pub fn search_relevant(
        &self,
        query_text: &str,
        filters: Option<&MetadataFilter>,
    ) -> RegulaResult<Vec<SearchHit>> {
        let hits = self.search(query_text, self.config.max_results, filters)?;
        Ok(apply_threshold(hits, self.config.similarity_threshold))
    }

    /// Fetch the indexed record for `rule_id`.
    ///
    /// # Errors
    /// `NotFound` if no such rule is indexed.
    pub fn get(&self, rule_id: &str) -> RegulaResult<EmbeddingRecord> {
        self.index
            .get(rule_id)?
            .ok_or_else(|| RegulaError::NotFound {
                rule_id: rule_id.to_string(),
            })
    }

    pub fn count(&self) -> RegulaResult<usize> {
        self.index.count()
    }
}
