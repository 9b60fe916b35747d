//! Top-level serif configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    EmbeddingConfig, IndexConfig, ObservabilityConfig, RerankConfig, RetrievalConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`DASHSCOPE_*`, `EMBEDDING_*`, `RERANK_*`, `INDEX_DIR_*`, `SERIF_LOG`)
/// 2. Config file (`serif.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SerifConfig {
    pub embedding: EmbeddingConfig,
    pub rerank: RerankConfig,
    pub indexes: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl SerifConfig {
    /// Load configuration from an optional TOML file plus the process environment.
    ///
    /// An explicitly named file that does not exist is an error; with `None`
    /// the defaults are used as the base layer.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides_with(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Unparsable numeric values are ignored and the previous layer wins.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DASHSCOPE_API_KEY") {
            self.embedding.api_key = v;
        }
        if let Some(v) = lookup("DASHSCOPE_BASE_URL") {
            self.embedding.base_url = v;
        }
        if let Some(v) = lookup("EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Some(v) = lookup("EMBEDDING_DIM").and_then(|v| v.parse().ok()) {
            self.embedding.dimensions = v;
        }
        if let Some(v) = lookup("RERANK_MODEL") {
            self.rerank.model = v;
        }
        if let Some(v) = lookup("RERANK_BASE_URL") {
            self.rerank.endpoint = v;
        }
        if let Some(v) = lookup("INDEX_DIR_SCOPE_1") {
            self.indexes.set_scope_dir(1, PathBuf::from(v));
        }
        if let Some(v) = lookup("INDEX_DIR_SCOPE_2") {
            self.indexes.set_scope_dir(2, PathBuf::from(v));
        }
        if let Some(v) = lookup("INDEX_DIR_SCENE") {
            self.indexes.scene_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SERIF_LOG") {
            self.observability.log_filter = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("embedding.dimensions", self.embedding.dimensions),
            ("embedding.batch_size", self.embedding.batch_size),
            ("embedding.parallelism", self.embedding.parallelism),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }

        let multipliers = [
            ("retrieval.text_overfetch", self.retrieval.text_overfetch),
            ("retrieval.scene_overfetch", self.retrieval.scene_overfetch),
        ];
        for (field, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }

        if self.rerank.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "rerank.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Bearer token for the rerank service, falling back to the embedding key.
    pub fn rerank_api_key(&self) -> &str {
        if self.rerank.api_key.is_empty() {
            &self.embedding.api_key
        } else {
            &self.rerank.api_key
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
