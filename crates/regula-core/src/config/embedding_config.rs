use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "tfidf", "onnx", "ollama".
    pub provider: String,
    /// Model name reported by the provider (and requested from Ollama).
    pub model_name: String,
    /// Path to the ONNX model file.
    pub model_path: Option<String>,
    /// Path to the HuggingFace `tokenizer.json` paired with the ONNX model.
    pub tokenizer_path: Option<String>,
    /// Output dimensions of the model. Fixed for the lifetime of a provider.
    pub dimensions: usize,
    /// Texts per provider call when embedding a batch.
    pub batch_size: usize,
    /// Input texts longer than this many characters are truncated before inference.
    pub max_input_chars: usize,
    /// Token sequences longer than this are truncated by the ONNX provider.
    pub max_sequence_length: usize,
    /// L1 in-memory cache max entries. Zero disables the cache.
    pub l1_cache_size: u64,
    /// Base URL of the Ollama server.
    pub ollama_url: String,
    /// HTTP request timeout for remote providers.
    pub request_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model_name: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            model_path: None,
            tokenizer_path: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            max_input_chars: defaults::DEFAULT_MAX_INPUT_CHARS,
            max_sequence_length: defaults::DEFAULT_MAX_SEQUENCE_LENGTH,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            ollama_url: defaults::DEFAULT_OLLAMA_URL.to_string(),
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
