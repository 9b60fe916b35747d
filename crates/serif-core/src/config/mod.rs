pub mod defaults;
pub mod embedding_config;
pub mod index_config;
pub mod observability_config;
pub mod rerank_config;
pub mod retrieval_config;
pub mod serif_config;

pub use embedding_config::EmbeddingConfig;
pub use index_config::{IndexConfig, ScopeDir};
pub use observability_config::ObservabilityConfig;
pub use rerank_config::RerankConfig;
pub use retrieval_config::RetrievalConfig;
pub use serif_config::SerifConfig;
