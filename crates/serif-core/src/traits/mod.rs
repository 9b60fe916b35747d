mod embedding;
mod reranker;

pub use embedding::EmbeddingProvider;
pub use reranker::RerankProvider;
