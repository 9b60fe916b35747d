//! Structured log events for key retrieval operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a successfully loaded index.
pub fn index_loaded(kind: &str, scope: u32, vectors: usize, logical_size: usize) {
    tracing::info!(
        event = "index_loaded",
        kind = %kind,
        scope = scope,
        vectors = vectors,
        logical_size = logical_size,
        "index loaded"
    );
}

/// Log metadata lines skipped during load.
pub fn metadata_lines_skipped(path: &str, skipped: usize) {
    tracing::warn!(
        event = "metadata_lines_skipped",
        path = %path,
        skipped = skipped,
        "skipped malformed metadata lines"
    );
}

/// Log a scope (or one of its index files) that is absent on disk.
pub fn scope_missing(kind: &str, scope: u32, path: &str) {
    tracing::warn!(
        event = "scope_missing",
        kind = %kind,
        scope = scope,
        path = %path,
        "index not found, scope unavailable"
    );
}

/// Log a request served from the default scope instead of the requested one.
pub fn scope_fallback(kind: &str, requested: u32, served: u32) {
    tracing::debug!(
        event = "scope_fallback",
        kind = %kind,
        requested = requested,
        served = served,
        "requested scope has no index, using default"
    );
}

/// Log a rerank attempt that fell back to coarse ordering.
pub fn rerank_degraded(provider: &str, reason: &str) {
    tracing::warn!(
        event = "rerank_degraded",
        provider = %provider,
        reason = %reason,
        fallback = "coarse_score",
        "rerank unavailable, using coarse ordering"
    );
}

/// Log a finished retrieval.
pub fn retrieval_completed(kind: &str, scope: u32, pool: usize, returned: usize, reranked: bool) {
    tracing::info!(
        event = "retrieval_completed",
        kind = %kind,
        scope = scope,
        pool = pool,
        returned = returned,
        reranked = reranked,
        "retrieval completed"
    );
}
