//! RetrievalPipeline: resolve → embed → overfetch search → rerank → fuse.

use std::sync::Arc;

use serif_core::config::defaults;
use serif_core::errors::SerifResult;
use serif_core::models::{IndexKind, RankedResult, RerankOutcome, ScopeId};
use serif_core::traits::RerankProvider;
use serif_embeddings::QueryEncoder;
use serif_index::IndexRegistry;
use serif_observability::events;
use tracing::debug;

use crate::ranking::fuse;

/// Candidate pool size for `top_k` results: `ceil(top_k * multiplier)`,
/// never below `top_k`.
pub fn pool_size(top_k: usize, multiplier: f32) -> usize {
    let scaled = (top_k as f64 * f64::from(multiplier)).ceil();
    // Float-to-int casts saturate; NaN becomes 0.
    (scaled as usize).max(top_k)
}

/// One retrieval call.
#[derive(Debug, Clone)]
pub struct RetrievalRequest {
    pub query: String,
    pub kind: IndexKind,
    pub scope: ScopeId,
    pub top_k: usize,
    pub overfetch: f32,
    /// Record field whose text is sent to the reranker.
    pub rerank_field: String,
}

impl RetrievalRequest {
    /// A request with the default scope, top-k and the kind's overfetch and rerank field.
    pub fn new(query: impl Into<String>, kind: IndexKind) -> Self {
        let overfetch = match kind {
            IndexKind::Scene => defaults::DEFAULT_SCENE_OVERFETCH,
            IndexKind::Match | IndexKind::Reply => defaults::DEFAULT_TEXT_OVERFETCH,
        };
        Self {
            query: query.into(),
            kind,
            scope: ScopeId::DEFAULT,
            top_k: defaults::DEFAULT_TOP_K,
            overfetch,
            rerank_field: kind.rerank_field().to_string(),
        }
    }

    pub fn scope(mut self, scope: ScopeId) -> Self {
        self.scope = scope;
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn overfetch(mut self, multiplier: f32) -> Self {
        self.overfetch = multiplier;
        self
    }

    pub fn rerank_field(mut self, field: impl Into<String>) -> Self {
        self.rerank_field = field.into();
        self
    }
}

/// The retrieve-then-rerank orchestrator. Shared behind `Arc`.
pub struct RetrievalPipeline {
    encoder: Arc<QueryEncoder>,
    registry: Arc<IndexRegistry>,
    reranker: Option<Arc<dyn RerankProvider>>,
}

impl RetrievalPipeline {
    pub fn new(
        encoder: Arc<QueryEncoder>,
        registry: Arc<IndexRegistry>,
        reranker: Option<Arc<dyn RerankProvider>>,
    ) -> Self {
        Self {
            encoder,
            registry,
            reranker,
        }
    }

    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    pub fn encoder(&self) -> &QueryEncoder {
        &self.encoder
    }

    /// Run one retrieval.
    ///
    /// An absent index yields an empty result; an embedding or index failure
    /// is an error; a reranker failure falls back to coarse ordering.
    pub async fn retrieve(&self, request: &RetrievalRequest) -> SerifResult<Vec<RankedResult>> {
        let kind = request.kind;
        let Some((served_scope, index)) = self.registry.resolve(kind, request.scope) else {
            debug!(kind = %kind, scope = %request.scope, "no index for scope or default");
            return Ok(Vec::new());
        };
        if request.top_k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.encoder.embed_query(&request.query).await?;

        let pool_k = pool_size(request.top_k, request.overfetch);
        let pool = index.search(&query_vector, pool_k)?;
        if pool.is_empty() {
            events::retrieval_completed(kind.as_str(), served_scope.0, 0, 0, false);
            return Ok(Vec::new());
        }

        let outcome = match &self.reranker {
            Some(reranker) => {
                let documents: Vec<String> = pool
                    .iter()
                    .map(|c| c.record.field_text(&request.rerank_field).to_string())
                    .collect();
                let outcome = reranker
                    .rerank(&request.query, &documents, request.top_k)
                    .await;
                if let RerankOutcome::Unavailable { reason } = &outcome {
                    events::rerank_degraded(reranker.name(), reason);
                }
                outcome
            }
            None => RerankOutcome::Ranked(Vec::new()),
        };

        let pool_len = pool.len();
        let results = fuse(pool, outcome, request.top_k);
        let reranked = results.iter().any(|r| r.rerank_score.is_some());
        events::retrieval_completed(
            kind.as_str(),
            served_scope.0,
            pool_len,
            results.len(),
            reranked,
        );
        Ok(results)
    }
}
