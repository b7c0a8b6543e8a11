use crate::errors::RegulaResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text.
    fn embed_one(&self, text: &str) -> RegulaResult<Vec<f32>>;

    /// Embed a batch of texts. Output `i` corresponds to `texts[i]`.
    fn embed_batch(&self, texts: &[String]) -> RegulaResult<Vec<Vec<f32>>>;

    /// The dimensionality of every vector this provider produces.
    fn dimensions(&self) -> usize;

    /// Human-readable provider/model name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
