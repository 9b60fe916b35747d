use async_trait::async_trait;

use crate::errors::SerifResult;

/// A remote (or local) text embedding service.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one batch of texts. The output has one vector per input, in input order.
    ///
    /// Any error is a hard failure; callers never receive partial batches.
    async fn embed_batch(&self, texts: &[String]) -> SerifResult<Vec<Vec<f32>>>;

    /// The dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
