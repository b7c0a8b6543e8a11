use serde::{Deserialize, Serialize};

use super::defaults;

/// Query facade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// `k` used when the caller does not pass one.
    pub default_top_k: usize,
    /// `k` used by `search_relevant`. Explicit `k` values are not capped.
    pub max_results: usize,
    /// Minimum cosine similarity for `apply_threshold`. Never applied by the index.
    pub similarity_threshold: f64,
    /// Timeout used by `search_with_timeout` when the caller passes none.
    pub query_timeout_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: defaults::DEFAULT_TOP_K,
            max_results: defaults::DEFAULT_MAX_RESULTS,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            query_timeout_ms: defaults::DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}
