use async_trait::async_trait;

use crate::models::RerankOutcome;

/// A relevance-scoring service for a query against a list of documents.
#[async_trait]
pub trait RerankProvider: Send + Sync {
    /// Score `documents` against `query` and return at most `top_n` hits,
    /// most relevant first.
    ///
    /// Implementations must not return an error: transport failures, bad
    /// statuses, malformed bodies and timeouts all become
    /// [`RerankOutcome::Unavailable`].
    async fn rerank(&self, query: &str, documents: &[String], top_n: usize) -> RerankOutcome;

    fn name(&self) -> &str;
}
