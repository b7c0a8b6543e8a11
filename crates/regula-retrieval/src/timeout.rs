//! Deadline-bounded search for async callers.
//!
//! The search itself is blocking (SQLite, model inference), so it runs on the
//! tokio blocking pool. On expiry the caller gets `Timeout` immediately; the
//! blocking task is not cancelled and finishes in the background.

use std::time::Duration;

use regula_core::errors::{RegulaError, RegulaResult};
use regula_core::models::{MetadataFilter, SearchHit};
use tracing::warn;

use crate::engine::RetrievalEngine;

/// Run [`RetrievalEngine::search`] bounded by `timeout`.
///
/// `None` uses `RetrievalConfig::query_timeout_ms`.
///
/// # Errors
/// `Timeout` when the deadline passes, `TaskFailed` if the search task
/// panicked, otherwise whatever the search returned (`InvalidArgument` for
/// blank query text among them).
pub async fn search_with_timeout(
    engine: &RetrievalEngine,
    query_text: &str,
    k: usize,
    filters: Option<MetadataFilter>,
    timeout: Option<Duration>,
) -> RegulaResult<Vec<SearchHit>> {
    let timeout =
        timeout.unwrap_or_else(|| Duration::from_millis(engine.config().query_timeout_ms));
    let engine = engine.clone();
    let query_text = query_text.to_string();

    let task = tokio::task::spawn_blocking(move || {
        engine.search(&query_text, k, filters.as_ref())
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(RegulaError::TaskFailed {
            reason: join_err.to_string(),
        }),
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(timeout_ms, "search timed out");
            Err(RegulaError::Timeout {
                operation: "search".to_string(),
                timeout_ms,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use regula_core::errors::RegulaResult;
    use regula_core::traits::IEmbeddingProvider;
    use regula_embeddings::TfIdfProvider;
    use regula_storage::MemoryVectorIndex;

    use super::*;

    struct SlowProvider {
        inner: TfIdfProvider,
        delay: Duration,
    }

    impl IEmbeddingProvider for SlowProvider {
        fn embed_one(&self, text: &str) -> RegulaResult<Vec<f32>> {
            thread::sleep(self.delay);
            self.inner.embed_one(text)
        }

        fn embed_batch(&self, texts: &[String]) -> RegulaResult<Vec<Vec<f32>>> {
            self.inner.embed_batch(texts)
        }

        fn dimensions(&self) -> usize {
            self.inner.dimensions()
        }

        fn name(&self) -> &str {
            "slow"
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    fn engine(delay: Duration) -> RetrievalEngine {
        let provider = SlowProvider {
            inner: TfIdfProvider::new(16),
            delay,
        };
        RetrievalEngine::new(Arc::new(provider), Arc::new(MemoryVectorIndex::new())).unwrap()
    }

    #[tokio::test]
    async fn fast_search_completes() {
        let engine = engine(Duration::ZERO);
        let hits = search_with_timeout(&engine, "risk", 3, None, Some(Duration::from_secs(5)))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn slow_search_times_out() {
        let engine = engine(Duration::from_millis(500));
        let err = search_with_timeout(&engine, "risk", 3, None, Some(Duration::from_millis(20)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegulaError::Timeout { timeout_ms: 20, .. }
        ));
    }

    #[tokio::test]
    async fn search_errors_pass_through() {
        let engine = engine(Duration::ZERO);
        let err = search_with_timeout(&engine, "risk", 0, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RegulaError::InvalidArgument { .. }));
    }
}
