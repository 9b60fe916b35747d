use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Scope used when the requested one has no index.
    pub default_scope: u32,
    pub default_top_k: usize,
    pub scene_default_top_k: usize,
    /// Candidate pool multiplier for match/reply searches.
    pub text_overfetch: f32,
    /// Candidate pool multiplier for scene searches.
    pub scene_overfetch: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_scope: defaults::DEFAULT_SCOPE,
            default_top_k: defaults::DEFAULT_TOP_K,
            scene_default_top_k: defaults::DEFAULT_SCENE_TOP_K,
            text_overfetch: defaults::DEFAULT_TEXT_OVERFETCH,
            scene_overfetch: defaults::DEFAULT_SCENE_OVERFETCH,
        }
    }
}
