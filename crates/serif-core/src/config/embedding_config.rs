use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Bearer token for the embedding service.
    pub api_key: String,
    /// OpenAI-compatible base URL; `/embeddings` is appended.
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Requested (and expected) vector dimensions.
    pub dimensions: usize,
    /// Texts per outbound request.
    pub batch_size: usize,
    /// Maximum concurrent outbound requests per encoder.
    pub parallelism: usize,
    /// Per-request timeout (seconds).
    pub request_timeout_secs: u64,
    /// Retries for transport errors and 5xx responses.
    pub max_retries: u32,
    /// Query embedding cache capacity. 0 disables the cache.
    pub query_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: defaults::DEFAULT_EMBEDDING_BASE_URL.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            parallelism: defaults::DEFAULT_EMBEDDING_PARALLELISM,
            request_timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}
