//! Embedding providers.

pub mod api_provider;

pub use api_provider::ApiProvider;

use std::sync::Arc;

use serif_core::config::EmbeddingConfig;
use serif_core::errors::SerifResult;
use serif_core::traits::EmbeddingProvider;
use tracing::{info, warn};

/// Create the configured embedding provider.
pub fn create_provider(config: &EmbeddingConfig) -> SerifResult<Arc<dyn EmbeddingProvider>> {
    if config.api_key.is_empty() {
        warn!("embedding api_key is empty; requests will likely be rejected");
    }
    let provider = ApiProvider::new(config)?;
    info!(
        provider = "api",
        endpoint = %provider.endpoint(),
        model = %config.model,
        dims = config.dimensions,
        "embedding provider created"
    );
    Ok(Arc::new(provider))
}
