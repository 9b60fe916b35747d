//! Merge a coarse candidate pool with a rerank outcome.

use serif_core::models::{Candidate, RankedResult, RerankHit, RerankOutcome};

/// Final ordering of `pool`, at most `top_k` results.
///
/// A non-empty ranking dictates the order exactly; otherwise the pool is
/// ordered by coarse score.
pub fn fuse(pool: Vec<Candidate>, outcome: RerankOutcome, top_k: usize) -> Vec<RankedResult> {
    let hits = outcome.into_hits();
    if hits.is_empty() {
        coarse_order(pool, top_k)
    } else {
        rerank_order(&pool, &hits, top_k)
    }
}

/// Results in reranker order. Indexes outside the pool are dropped;
/// repeated indexes are kept as the service returned them.
pub fn rerank_order(pool: &[Candidate], hits: &[RerankHit], top_k: usize) -> Vec<RankedResult> {
    hits.iter()
        .filter_map(|hit| {
            pool.get(hit.index)
                .map(|c| RankedResult::reranked(c.clone(), hit.relevance))
        })
        .take(top_k)
        .collect()
}

/// Stable sort by coarse score descending, truncated to `top_k`.
pub fn coarse_order(mut pool: Vec<Candidate>, top_k: usize) -> Vec<RankedResult> {
    pool.sort_by(|a, b| b.score.total_cmp(&a.score));
    pool.truncate(top_k);
    pool.into_iter().map(RankedResult::coarse).collect()
}
