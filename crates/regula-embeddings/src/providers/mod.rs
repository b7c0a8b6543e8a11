//! Provider registry.
//!
//! The provider named in `EmbeddingConfig.provider` is built as configured or
//! the call fails. There is no fallback to a different provider: vectors from
//! two models never share an index.

#[cfg(feature = "onnx")]
pub mod onnx;
pub mod ollama;
pub mod tfidf;

pub use ollama::OllamaProvider;
#[cfg(feature = "onnx")]
pub use onnx::OnnxProvider;
pub use tfidf::TfIdfProvider;

use regula_core::config::EmbeddingConfig;
use regula_core::errors::{EmbeddingError, RegulaResult};
use regula_core::traits::IEmbeddingProvider;
use tracing::info;

/// Create the configured provider, boxed.
///
/// # Errors
/// `ProviderUnavailable` for unknown names, unreachable servers, or the
/// `onnx` provider in builds without the `onnx` feature. `ModelLoadFailed`
/// when model or tokenizer files cannot be loaded.
pub fn create_provider(config: &EmbeddingConfig) -> RegulaResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "tfidf" => {
            info!(provider = "tfidf", dims = config.dimensions, "embedding provider ready");
            Ok(Box::new(TfIdfProvider::new(config.dimensions)))
        }
        "onnx" => create_onnx(config),
        "ollama" => {
            let provider = OllamaProvider::new(config)?;
            if !provider.health_check() {
                return Err(EmbeddingError::ProviderUnavailable {
                    provider: format!("ollama at {}", config.ollama_url),
                }
                .into());
            }
            info!(provider = "ollama", model = %config.model_name, "embedding provider connected");
            Ok(Box::new(provider))
        }
        other => Err(EmbeddingError::ProviderUnavailable {
            provider: other.to_string(),
        }
        .into()),
    }
}

#[cfg(feature = "onnx")]
fn create_onnx(config: &EmbeddingConfig) -> RegulaResult<Box<dyn IEmbeddingProvider>> {
    let provider = OnnxProvider::load(config)?;
    info!(provider = "onnx", model = provider.name(), "embedding provider loaded");
    Ok(Box::new(provider))
}

#[cfg(not(feature = "onnx"))]
fn create_onnx(_config: &EmbeddingConfig) -> RegulaResult<Box<dyn IEmbeddingProvider>> {
    Err(EmbeddingError::ProviderUnavailable {
        provider: "onnx (built without the `onnx` feature)".to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regula_core::errors::RegulaError;

    #[test]
    fn tfidf_is_built_with_configured_dims() {
        let config = EmbeddingConfig {
            dimensions: 64,
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.dimensions(), 64);
        assert_eq!(provider.name(), "tfidf");
    }

    #[test]
    fn unknown_provider_is_unavailable() {
        let config = EmbeddingConfig {
            provider: "word2vec".into(),
            ..Default::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(
            err,
            RegulaError::EmbeddingError(EmbeddingError::ProviderUnavailable { .. })
        ));
    }

    #[test]
    fn unreachable_ollama_is_unavailable() {
        let config = EmbeddingConfig {
            provider: "ollama".into(),
            ollama_url: "http://127.0.0.1:9".into(),
            request_timeout_secs: 1,
            ..Default::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("127.0.0.1:9"));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn onnx_without_feature_is_unavailable() {
        let config = EmbeddingConfig {
            provider: "onnx".into(),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }
}
