//! Ollama HTTP embedding provider.
//!
//! Posts batches to `/api/embed` with the blocking reqwest client. Vectors are
//! returned as produced; dimension checks happen in the engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use regula_core::config::EmbeddingConfig;
use regula_core::errors::{EmbeddingError, RegulaResult};
use regula_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct OllamaProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    name: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// Build a provider for `config.ollama_url` / `config.model_name`.
    /// Unavailable until [`health_check`](Self::health_check) passes.
    pub fn new(config: &EmbeddingConfig) -> RegulaResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("ollama: http client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model_name.clone(),
            name: format!("ollama:{}", config.model_name),
            dimensions: config.dimensions,
            available: AtomicBool::new(false),
        })
    }

    /// Whether the server answers `/api/tags`. Updates availability.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let ok = match self.client.get(&url).send() {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, url = %url, "Ollama unreachable");
                false
            }
        };
        self.available.store(ok, Ordering::Relaxed);
        ok
    }

    fn request_embeddings(&self, texts: &[String]) -> RegulaResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name.clone(),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Ollama HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("Ollama returned {status}: {body}"),
            }
            .into());
        }

        let resp: OllamaEmbedResponse =
            response
                .json()
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama JSON parse error: {e}"),
                })?;

        if resp.embeddings.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "Ollama returned {} embeddings for {} inputs",
                    resp.embeddings.len(),
                    texts.len()
                ),
            }
            .into());
        }
        Ok(resp.embeddings)
    }
}

impl IEmbeddingProvider for OllamaProvider {
    fn embed_one(&self, text: &str) -> RegulaResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> RegulaResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_before_health_check() {
        let p = OllamaProvider::new(&EmbeddingConfig::default()).unwrap();
        assert!(!p.is_available());
        assert!(p.embed_one("text").is_err());
        assert_eq!(p.name(), "ollama:all-MiniLM-L6-v2");
    }

    #[test]
    fn empty_batch_needs_no_server() {
        let p = OllamaProvider::new(&EmbeddingConfig::default()).unwrap();
        assert!(p.embed_batch(&[]).unwrap().is_empty());
    }
}
