//! AppContext end to end: on-disk indexes, stubbed services, presentation.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use serif_core::config::ScopeDir;
use serif_core::errors::{ConfigError, SerifError};
use serif_core::models::{IndexKind, ScopeId};
use serif_core::traits::{EmbeddingProvider, RerankProvider};
use serif_core::SerifConfig;
use serif_index::IndexRegistry;
use serif_retrieval::{AppContext, SceneSearchRequest, SearchRequest};
use tempfile::TempDir;
use test_fixtures::{
    axis, write_flat_ip_index, write_metadata, HttpStub, MockEmbedder, MockReranker, StubResponse,
};

const DIMS: usize = 3;

fn write_match_scope(dir: &Path) {
    write_flat_ip_index(
        &dir.join(IndexKind::Match.index_file()),
        DIMS,
        &[axis(DIMS, 0), axis(DIMS, 1), axis(DIMS, 2)],
    )
    .unwrap();
    write_metadata(
        &dir.join(IndexKind::Match.meta_file()),
        &[
            r#"{"text":"line zero","work_name":"Show","episode_number":1,"time_s":3.5,"image_path":"ep1/0.jpg"}"#,
            r#"{"text":"line one","episode_index":"SP1","image":"/sp/1.jpg"}"#,
            r#"{"text":"line two"}"#,
        ],
    )
    .unwrap();
}

fn write_reply_scope(dir: &Path) {
    write_flat_ip_index(
        &dir.join(IndexKind::Reply.index_file()),
        DIMS,
        &[axis(DIMS, 0), axis(DIMS, 1)],
    )
    .unwrap();
    write_metadata(
        &dir.join(IndexKind::Reply.meta_file()),
        &[
            r#"{"question_text":"are you ready","answer_text":"always","answer_image_path":"r/0.jpg","raw_answer_record":{"episode_number":7}}"#,
            r#"{"question_text":"what now","answer_text":"we wait"}"#,
        ],
    )
    .unwrap();
}

fn write_scene(dir: &Path) {
    write_flat_ip_index(
        &dir.join(IndexKind::Scene.index_file()),
        DIMS,
        &[axis(DIMS, 0), axis(DIMS, 1)],
    )
    .unwrap();
    write_metadata(
        &dir.join(IndexKind::Scene.meta_file()),
        &[
            r#"{"text":"a red sunset","image_path":"scenes/sunset.jpg"}"#,
            r#"{"text":"rain on a window","image_path":"http://cdn.example/rain.jpg"}"#,
        ],
    )
    .unwrap();
}

fn config_for(tmp: &TempDir) -> SerifConfig {
    let mut config = SerifConfig::default();
    config.embedding.dimensions = DIMS;
    config.rerank.enabled = false;
    config.indexes.scopes = vec![ScopeDir {
        id: 1,
        dir: tmp.path().join("scope1"),
    }];
    config.indexes.scene_dir = tmp.path().join("scene");
    config
}

fn context_with_mocks(config: SerifConfig, reranker: Option<Arc<MockReranker>>) -> AppContext {
    let embedder: Arc<dyn EmbeddingProvider> =
        Arc::new(MockEmbedder::new(DIMS).with_vector("q", axis(DIMS, 0)));
    let registry = IndexRegistry::load(&config.indexes, ScopeId(1)).unwrap();
    let reranker = reranker.map(|r| r as Arc<dyn RerankProvider>);
    AppContext::from_parts(config, embedder, Arc::new(registry), reranker)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Bootstrap
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn bootstrap_serves_match_search_over_http_embeddings() {
    let tmp = TempDir::new().unwrap();
    write_match_scope(&tmp.path().join("scope1"));
    let stub = HttpStub::start(vec![StubResponse::json(
        200,
        json!({"data": [{"index": 0, "embedding": [1.0, 0.0, 0.0]}]}),
    )])
    .await;
    let mut config = config_for(&tmp);
    config.embedding.base_url = stub.url("/compatible-mode/v1");

    let ctx = AppContext::bootstrap(config).unwrap();
    let response = ctx
        .search_match(&SearchRequest {
            query: "hello".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.results.len(), 3);
    let top = &response.results[0];
    assert_eq!(top.text, "line zero");
    assert_eq!(top.image_path, "/images/ep1/0.jpg");
    assert_eq!(top.time_s, Some(3.5));
    assert_eq!(top.coarse_score, 1.0);
    assert_eq!(top.rerank_score, None);
    assert_eq!(stub.request_count(), 1);
}

#[test]
fn bootstrap_rejects_invalid_config() {
    let tmp = TempDir::new().unwrap();
    let mut config = config_for(&tmp);
    config.embedding.batch_size = 0;

    let err = AppContext::bootstrap(config).err().unwrap();

    assert!(matches!(
        err,
        SerifError::Config(ConfigError::ValidationFailed { .. })
    ));
}

#[tokio::test]
async fn bootstrap_without_indexes_returns_empty_results() {
    let tmp = TempDir::new().unwrap();
    let mut config = config_for(&tmp);
    config.embedding.base_url = "http://127.0.0.1:9/v1".to_string();

    let ctx = AppContext::bootstrap(config).unwrap();
    assert!(ctx.pipeline().registry().is_empty());

    let response = ctx
        .search_scene(&SceneSearchRequest {
            query: "anything".to_string(),
            top_k: None,
        })
        .await
        .unwrap();
    assert!(response.results.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Searches
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn reply_search_presents_answers_with_defaults() {
    let tmp = TempDir::new().unwrap();
    write_reply_scope(&tmp.path().join("scope1"));
    let reranker = Arc::new(MockReranker::ranking(&[(0, 0.77)]));
    let ctx = context_with_mocks(config_for(&tmp), Some(reranker.clone()));

    let request: SearchRequest =
        serde_json::from_value(json!({"query": "q", "scope": 5})).unwrap();
    let response = ctx.search_reply(&request).await.unwrap();

    assert_eq!(reranker.last_top_n(), 10);
    assert_eq!(reranker.last_documents(), vec!["are you ready", "what now"]);
    assert_eq!(response.results.len(), 1);
    let hit = &response.results[0];
    assert_eq!(hit.answer_text, "always");
    assert_eq!(hit.answer_image_path, "/images/r/0.jpg");
    assert_eq!(hit.rerank_score, Some(0.77));
    assert_eq!(serde_json::to_value(&hit.episode_index).unwrap(), json!(7));
}

#[tokio::test]
async fn scene_search_scores_and_paths() {
    let tmp = TempDir::new().unwrap();
    write_scene(&tmp.path().join("scene"));
    let reranker = Arc::new(MockReranker::ranking(&[(1, 0.6), (0, 0.4)]));
    let ctx = context_with_mocks(config_for(&tmp), Some(reranker.clone()));

    let response = ctx
        .search_scene(&SceneSearchRequest {
            query: "q".to_string(),
            top_k: Some(2),
        })
        .await
        .unwrap();

    assert_eq!(reranker.last_top_n(), 2);
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].image, "http://cdn.example/rain.jpg");
    assert_eq!(response.results[0].score, 0.6);
    assert_eq!(response.results[1].image, "/images/scenes/sunset.jpg");
    assert_eq!(response.results[1].raw_path, "scenes/sunset.jpg");
}

#[tokio::test]
async fn scene_search_without_reranker_reports_raw_coarse_score() {
    let tmp = TempDir::new().unwrap();
    write_scene(&tmp.path().join("scene"));
    let ctx = context_with_mocks(config_for(&tmp), None);

    let response = ctx
        .search_scene(&SceneSearchRequest {
            query: "q".to_string(),
            top_k: Some(1),
        })
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].text, "a red sunset");
    assert!((response.results[0].score - 1.0).abs() < 1e-6);
}

#[test]
fn search_request_fields_default_to_none() {
    let req: SearchRequest = serde_json::from_str(r#"{"query":"hi"}"#).unwrap();
    assert_eq!(req.top_k, None);
    assert_eq!(req.scope, None);
}
