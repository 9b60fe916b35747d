//! QueryEncoder: batched, bounded-concurrency embedding.
//!
//! Input texts are cut into fixed-size batches. Each batch becomes one task
//! that makes exactly one provider call while holding a semaphore permit, so
//! outbound concurrency never exceeds the configured width no matter how many
//! requests share the encoder. Results are slotted back by batch index.

use std::sync::Arc;

use serif_core::config::EmbeddingConfig;
use serif_core::errors::{EmbeddingError, SerifResult};
use serif_core::traits::EmbeddingProvider;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::cache::QueryCache;

/// Encodes query texts into vectors through an [`EmbeddingProvider`].
pub struct QueryEncoder {
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
    parallelism: usize,
    permits: Arc<Semaphore>,
    cache: Option<QueryCache>,
}

impl QueryEncoder {
    /// Create an encoder without a query cache. Zero sizes are treated as 1.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, batch_size: usize, parallelism: usize) -> Self {
        let parallelism = parallelism.max(1);
        Self {
            provider,
            batch_size: batch_size.max(1),
            parallelism,
            permits: Arc::new(Semaphore::new(parallelism)),
            cache: None,
        }
    }

    /// Create an encoder from config, with the query cache when enabled.
    pub fn from_config(provider: Arc<dyn EmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        let encoder = Self::new(provider, config.batch_size, config.parallelism);
        let encoder = if config.query_cache_size > 0 {
            encoder.with_cache(config.query_cache_size)
        } else {
            encoder
        };
        info!(
            provider = encoder.provider.name(),
            dims = encoder.provider.dimensions(),
            batch_size = encoder.batch_size,
            parallelism = encoder.parallelism,
            cache = encoder.cache.is_some(),
            "QueryEncoder initialized"
        );
        encoder
    }

    /// Enable single-query memoization with the given capacity.
    pub fn with_cache(mut self, max_entries: u64) -> Self {
        self.cache = Some(QueryCache::new(max_entries));
        self
    }

    /// Embed `texts`, returning one vector per text in input order.
    ///
    /// Any failing batch fails the whole call; in-flight batches are aborted
    /// and no partial result is returned.
    pub async fn encode(&self, texts: &[String]) -> SerifResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch_count = texts.len().div_ceil(self.batch_size);
        let mut tasks = JoinSet::new();
        for (batch_idx, batch) in texts.chunks(self.batch_size).enumerate() {
            let permit = Arc::clone(&self.permits)
                .acquire_owned()
                .await
                .map_err(|e| EmbeddingError::WorkerFailed {
                    reason: e.to_string(),
                })?;
            let provider = Arc::clone(&self.provider);
            let batch = batch.to_vec();
            tasks.spawn(async move {
                let _permit = permit;
                let result = provider.embed_batch(&batch).await;
                (batch_idx, batch.len(), result)
            });
        }

        let mut slots: Vec<Option<Vec<Vec<f32>>>> = vec![None; batch_count];
        while let Some(joined) = tasks.join_next().await {
            let (batch_idx, expected, result) =
                joined.map_err(|e| EmbeddingError::WorkerFailed {
                    reason: e.to_string(),
                })?;
            let vectors = result?;
            self.check_batch(&vectors, expected)?;
            debug!(batch = batch_idx, size = expected, "embedding batch completed");
            slots[batch_idx] = Some(vectors);
        }

        let mut out = Vec::with_capacity(texts.len());
        for (batch_idx, slot) in slots.into_iter().enumerate() {
            let vectors = slot.ok_or_else(|| EmbeddingError::WorkerFailed {
                reason: format!("batch {batch_idx} produced no result"),
            })?;
            out.extend(vectors);
        }
        Ok(out)
    }

    /// Embed a single query, consulting the cache first.
    pub async fn embed_query(&self, query: &str) -> SerifResult<Vec<f32>> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(query) {
                debug!("query embedding cache hit");
                return Ok(hit);
            }
        }

        let vector = self
            .encode(&[query.to_string()])
            .await?
            .pop()
            .ok_or(EmbeddingError::CountMismatch {
                expected: 1,
                actual: 0,
            })?;

        if let Some(cache) = &self.cache {
            cache.insert(query, vector.clone());
        }
        Ok(vector)
    }

    fn check_batch(&self, vectors: &[Vec<f32>], expected: usize) -> SerifResult<()> {
        if vectors.len() != expected {
            return Err(EmbeddingError::CountMismatch {
                expected,
                actual: vectors.len(),
            }
            .into());
        }
        let dims = self.provider.dimensions();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dims) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: dims,
                actual: bad.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }
}
