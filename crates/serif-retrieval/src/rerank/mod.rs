//! Relevance reranking.

pub mod http_reranker;

pub use http_reranker::HttpReranker;

use std::sync::Arc;

use serif_core::errors::SerifResult;
use serif_core::traits::RerankProvider;
use serif_core::SerifConfig;
use tracing::{info, warn};

/// Create the configured reranker, or `None` when reranking is disabled.
pub fn create_reranker(config: &SerifConfig) -> SerifResult<Option<Arc<dyn RerankProvider>>> {
    if !config.rerank.enabled {
        info!("reranking disabled, results use coarse ordering");
        return Ok(None);
    }
    let api_key = config.rerank_api_key();
    if api_key.is_empty() {
        warn!("rerank api_key is empty; rerank calls will likely degrade");
    }
    let reranker = HttpReranker::new(&config.rerank, api_key)?;
    info!(
        endpoint = %reranker.endpoint(),
        model = %config.rerank.model,
        timeout_secs = config.rerank.timeout_secs,
        "reranker created"
    );
    Ok(Some(Arc::new(reranker)))
}
