//! # regula-embeddings
//!
//! Turns rules into embedding vectors.
//!
//! ```text
//! EmbeddingEngine
//! ├── synthesis   (rule -> labeled document text)
//! ├── providers
//! │   ├── TfIdfProvider  (deterministic, always available)
//! │   ├── OnnxProvider   (feature "onnx", local sentence-transformer)
//! │   └── OllamaProvider (HTTP)
//! ├── L1 cache (moka, keyed by blake3 of the input)
//! └── vectors  (dimension checks, normalization)
//! ```

pub mod cache;
pub mod engine;
pub mod providers;
pub mod synthesis;
pub mod vectors;

pub use cache::L1MemoryCache;
pub use engine::EmbeddingEngine;
#[cfg(feature = "onnx")]
pub use providers::OnnxProvider;
pub use providers::{create_provider, OllamaProvider, TfIdfProvider};
pub use synthesis::{synthesize, synthesize_query};
