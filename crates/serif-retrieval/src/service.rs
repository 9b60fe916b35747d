//! Search surface: one immutable context built at startup, three searches.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serif_core::errors::SerifResult;
use serif_core::models::{IndexKind, RankedResult, ScopeId};
use serif_core::traits::{EmbeddingProvider, RerankProvider};
use serif_core::SerifConfig;
use serif_embeddings::{create_provider, QueryEncoder};
use serif_index::IndexRegistry;
use tracing::info;

use crate::pipeline::{RetrievalPipeline, RetrievalRequest};
use crate::present::{ReplyHit, SceneHit, SubtitleHit};
use crate::rerank::create_reranker;

/// Body of a match or reply search. Missing fields take the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub scope: Option<u32>,
}

/// Body of a scene search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSearchRequest {
    pub query: String,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
}

/// Everything a search needs, built once and shared read-only.
pub struct AppContext {
    config: SerifConfig,
    pipeline: RetrievalPipeline,
}

impl AppContext {
    /// Validate `config`, create the providers and load every index.
    pub fn bootstrap(config: SerifConfig) -> SerifResult<Self> {
        config.validate()?;
        let provider = create_provider(&config.embedding)?;
        let reranker = create_reranker(&config)?;
        let default_scope = ScopeId(config.retrieval.default_scope);
        let registry = IndexRegistry::load(&config.indexes, default_scope)?;
        let ctx = Self::from_parts(config, provider, Arc::new(registry), reranker);
        info!(
            indexes = ctx.pipeline.registry().len(),
            reranker = ctx.config.rerank.enabled,
            "serif context ready"
        );
        Ok(ctx)
    }

    /// Assemble a context from already-built parts.
    pub fn from_parts(
        config: SerifConfig,
        provider: Arc<dyn EmbeddingProvider>,
        registry: Arc<IndexRegistry>,
        reranker: Option<Arc<dyn RerankProvider>>,
    ) -> Self {
        let encoder = Arc::new(QueryEncoder::from_config(provider, &config.embedding));
        Self {
            pipeline: RetrievalPipeline::new(encoder, registry, reranker),
            config,
        }
    }

    pub fn config(&self) -> &SerifConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &RetrievalPipeline {
        &self.pipeline
    }

    /// Subtitle lines closest to the query.
    pub async fn search_match(
        &self,
        req: &SearchRequest,
    ) -> SerifResult<SearchResponse<SubtitleHit>> {
        let results = self.run_text(IndexKind::Match, req).await?;
        Ok(self.present(&results, SubtitleHit::from_result))
    }

    /// Answers to the question lines closest to the query.
    pub async fn search_reply(
        &self,
        req: &SearchRequest,
    ) -> SerifResult<SearchResponse<ReplyHit>> {
        let results = self.run_text(IndexKind::Reply, req).await?;
        Ok(self.present(&results, ReplyHit::from_result))
    }

    /// Images whose description is closest to the query.
    pub async fn search_scene(
        &self,
        req: &SceneSearchRequest,
    ) -> SerifResult<SearchResponse<SceneHit>> {
        let retrieval = &self.config.retrieval;
        let request = RetrievalRequest::new(req.query.clone(), IndexKind::Scene)
            .scope(ScopeId(retrieval.default_scope))
            .top_k(req.top_k.unwrap_or(retrieval.scene_default_top_k))
            .overfetch(retrieval.scene_overfetch);
        let results = self.pipeline.retrieve(&request).await?;
        Ok(self.present(&results, SceneHit::from_result))
    }

    async fn run_text(
        &self,
        kind: IndexKind,
        req: &SearchRequest,
    ) -> SerifResult<Vec<RankedResult>> {
        let retrieval = &self.config.retrieval;
        let request = RetrievalRequest::new(req.query.clone(), kind)
            .scope(ScopeId(req.scope.unwrap_or(retrieval.default_scope)))
            .top_k(req.top_k.unwrap_or(retrieval.default_top_k))
            .overfetch(retrieval.text_overfetch);
        self.pipeline.retrieve(&request).await
    }

    fn present<T>(
        &self,
        results: &[RankedResult],
        view: fn(&RankedResult, &str) -> Option<T>,
    ) -> SearchResponse<T> {
        let prefix = self.config.indexes.image_url_prefix.as_str();
        SearchResponse {
            results: results.iter().filter_map(|r| view(r, prefix)).collect(),
        }
    }
}
