use serde::{Deserialize, Serialize};

use super::defaults;

/// Rerank service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// When false the pipeline always uses coarse-score ordering.
    pub enabled: bool,
    /// Bearer token. Empty means "reuse the embedding key".
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// Upper bound on a single rerank call (seconds).
    pub timeout_secs: u64,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_RERANK_ENABLED,
            api_key: String::new(),
            model: defaults::DEFAULT_RERANK_MODEL.to_string(),
            endpoint: defaults::DEFAULT_RERANK_ENDPOINT.to_string(),
            timeout_secs: defaults::DEFAULT_RERANK_TIMEOUT_SECS,
        }
    }
}
