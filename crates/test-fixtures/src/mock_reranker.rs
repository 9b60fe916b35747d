//! Rerank provider returning a canned outcome.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serif_core::models::{RerankHit, RerankOutcome};
use serif_core::traits::RerankProvider;

/// Mock reranker. Records every call's documents and `top_n`.
pub struct MockReranker {
    outcome: RerankOutcome,
    calls: AtomicUsize,
    last_documents: Mutex<Vec<String>>,
    last_top_n: AtomicUsize,
}

impl MockReranker {
    pub fn new(outcome: RerankOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_documents: Mutex::new(Vec::new()),
            last_top_n: AtomicUsize::new(0),
        }
    }

    /// Reranker answering with `(index, relevance)` pairs in the given order.
    pub fn ranking(pairs: &[(usize, f32)]) -> Self {
        Self::new(RerankOutcome::Ranked(
            pairs
                .iter()
                .map(|&(index, relevance)| RerankHit { index, relevance })
                .collect(),
        ))
    }

    /// Reranker that is always unavailable.
    pub fn unavailable() -> Self {
        Self::new(RerankOutcome::unavailable("mock outage"))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_documents(&self) -> Vec<String> {
        self.last_documents.lock().unwrap().clone()
    }

    pub fn last_top_n(&self) -> usize {
        self.last_top_n.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RerankProvider for MockReranker {
    async fn rerank(&self, _query: &str, documents: &[String], top_n: usize) -> RerankOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_documents.lock().unwrap() = documents.to_vec();
        self.last_top_n.store(top_n, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        "mock-reranker"
    }
}
