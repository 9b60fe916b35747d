use super::{ConfigError, EmbeddingError, IndexError};

/// Top-level error for everything that is allowed to escape the retrieval core.
///
/// Reranker failures and missing indexes never appear here; they degrade inside
/// the pipeline instead.
#[derive(Debug, thiserror::Error)]
pub enum SerifError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("http client setup failed: {reason}")]
    HttpClient { reason: String },
}

pub type SerifResult<T> = Result<T, SerifError>;
