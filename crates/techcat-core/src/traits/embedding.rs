use crate::errors::TechcatResult;

/// Embedding capability: text to fixed-length vector.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> TechcatResult<Vec<f32>>;

    /// Embed a batch of texts. Output is parallel to input.
    fn embed_batch(&self, texts: &[String]) -> TechcatResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
