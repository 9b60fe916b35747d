//! In-process embedding provider with call accounting, latency injection and
//! failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serif_core::errors::{EmbeddingError, SerifResult};
use serif_core::traits::EmbeddingProvider;

type DelayFn = Box<dyn Fn(&[String]) -> Duration + Send + Sync>;

/// Deterministic pseudo-embedding of `text` (FNV-1a seeded).
pub fn fixture_vector(text: &str, dims: usize) -> Vec<f32> {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in text.bytes() {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    (0..dims)
        .map(|i| {
            let mixed = hash.rotate_left((i % 64) as u32) ^ (i as u64);
            (mixed % 1000) as f32 / 1000.0 - 0.5
        })
        .collect()
}

/// Mock embedding provider.
pub struct MockEmbedder {
    dims: usize,
    overrides: HashMap<String, Vec<f32>>,
    fail_on: Option<String>,
    delay: Option<DelayFn>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    batches: Mutex<Vec<Vec<String>>>,
}

impl MockEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            overrides: HashMap::new(),
            fail_on: None,
            delay: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            batches: Mutex::new(Vec::new()),
        }
    }

    /// Return `vector` whenever `text` is embedded.
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.overrides.insert(text.to_string(), vector);
        self
    }

    /// Fail any batch containing `text`.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    /// Sleep for `f(batch)` before answering each batch.
    pub fn with_delay_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String]) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Box::new(f));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of concurrently running `embed_batch` calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Batches received, in arrival order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        self.overrides
            .get(text)
            .cloned()
            .unwrap_or_else(|| fixture_vector(text, self.dims))
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> SerifResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(texts.to_vec());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(texts)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(bad) = &self.fail_on {
            if texts.iter().any(|t| t == bad) {
                return Err(EmbeddingError::BadStatus {
                    status: 500,
                    body: format!("mock failure on {bad}"),
                }
                .into());
            }
        }
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "mock-embedder"
    }
}
