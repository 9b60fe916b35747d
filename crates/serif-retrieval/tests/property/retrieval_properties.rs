use std::sync::Arc;

use proptest::prelude::*;
use serif_core::models::{
    Candidate, IndexKind, MetadataRecord, RerankHit, RerankOutcome, SceneRecord, ScopeId,
};
use serif_core::traits::{EmbeddingProvider, RerankProvider};
use serif_embeddings::QueryEncoder;
use serif_index::{FlatIpIndex, IndexRegistry, ScopedVectorIndex};
use serif_retrieval::ranking::{coarse_order, fuse};
use serif_retrieval::{pool_size, RetrievalPipeline, RetrievalRequest};
use test_fixtures::{axis, MockEmbedder, MockReranker};

const DIMS: usize = 4;

fn pool(scores: &[f32]) -> Vec<Candidate> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| Candidate {
            position: i,
            record: MetadataRecord::Scene(SceneRecord {
                text: format!("scene {i}"),
                image_path: format!("{i}.jpg"),
            }),
            score,
        })
        .collect()
}

fn outcome_strategy() -> impl Strategy<Value = RerankOutcome> {
    prop_oneof![
        Just(RerankOutcome::unavailable("down")),
        prop::collection::vec((0usize..40, -1.0f32..1.0), 0..20).prop_map(|pairs| {
            RerankOutcome::Ranked(
                pairs
                    .into_iter()
                    .map(|(index, relevance)| RerankHit { index, relevance })
                    .collect(),
            )
        }),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

// ── Fusion never returns more than top_k ─────────────────────────────────

proptest! {
    #[test]
    fn fusion_respects_top_k(
        scores in prop::collection::vec(-1.0f32..1.0, 0..30),
        outcome in outcome_strategy(),
        top_k in 0usize..15,
    ) {
        let out = fuse(pool(&scores), outcome, top_k);
        prop_assert!(out.len() <= top_k);
    }
}

// ── Without a ranking the order is a stable coarse sort ──────────────────

proptest! {
    #[test]
    fn fallback_is_stable_descending_sort(
        scores in prop::collection::vec(
            prop::sample::select(vec![0.1f32, 0.4, 0.4, 0.7]),
            0..25,
        ),
        top_k in 0usize..30,
    ) {
        let out = fuse(pool(&scores), RerankOutcome::unavailable("down"), top_k);

        let mut expected: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        expected.sort_by(|a, b| b.1.total_cmp(&a.1));
        expected.truncate(top_k);
        let got: Vec<(usize, f32)> = out
            .iter()
            .map(|r| (r.candidate.position, r.candidate.score))
            .collect();
        prop_assert_eq!(got, expected);
        prop_assert!(out.iter().all(|r| r.rerank_score.is_none()));
    }

    #[test]
    fn empty_ranking_matches_coarse_order(
        scores in prop::collection::vec(-1.0f32..1.0, 0..25),
        top_k in 0usize..30,
    ) {
        let fused = fuse(pool(&scores), RerankOutcome::Ranked(vec![]), top_k);
        prop_assert_eq!(fused, coarse_order(pool(&scores), top_k));
    }
}

// ── Display score is the coarse score mapped onto [0, 1] ─────────────────

proptest! {
    #[test]
    fn display_score_tracks_coarse_score(
        scores in prop::collection::vec(-1.0f32..=1.0, 1..20),
        outcome in outcome_strategy(),
    ) {
        let top_k = scores.len();
        for r in fuse(pool(&scores), outcome, top_k) {
            let expected = (r.candidate.score + 1.0) / 2.0;
            prop_assert!((r.display_score - expected).abs() < 1e-6);
            prop_assert!((0.0..=1.0).contains(&r.display_score));
        }
    }
}

// ── Pool size covers top_k for any multiplier ────────────────────────────

proptest! {
    #[test]
    fn pool_is_never_smaller_than_top_k(top_k in 0usize..500, multiplier in -3.0f32..10.0) {
        prop_assert!(pool_size(top_k, multiplier) >= top_k);
    }
}

// ── End to end through the pipeline ──────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn pipeline_results_are_bounded_and_in_range(
        rows in 0usize..30,
        top_k in 0usize..12,
        ranking in prop::collection::vec((0usize..60, 0.0f32..1.0), 0..15),
    ) {
        let vectors: Vec<Vec<f32>> = (0..rows).map(|i| axis(DIMS, i % DIMS)).collect();
        let records = (0..rows)
            .map(|i| {
                MetadataRecord::Scene(SceneRecord {
                    text: format!("scene {i}"),
                    image_path: String::new(),
                })
            })
            .collect();
        let engine = FlatIpIndex::from_vectors(DIMS, &vectors).unwrap();
        let index = ScopedVectorIndex::from_parts(IndexKind::Scene, Box::new(engine), records);
        let registry = IndexRegistry::builder().insert(ScopeId(1), index).build();

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(MockEmbedder::new(DIMS).with_vector("q", axis(DIMS, 0)));
        let reranker: Arc<dyn RerankProvider> = Arc::new(MockReranker::ranking(&ranking));
        let pipeline = RetrievalPipeline::new(
            Arc::new(QueryEncoder::new(embedder, 8, 2)),
            Arc::new(registry),
            Some(reranker),
        );

        let request = RetrievalRequest::new("q", IndexKind::Scene).top_k(top_k);
        let out = runtime().block_on(pipeline.retrieve(&request)).unwrap();

        prop_assert!(out.len() <= top_k);
        prop_assert!(out.iter().all(|r| r.candidate.position < rows));
    }
}
