use serde::Serialize;

use super::MetadataRecord;

/// Map a cosine similarity in [-1, 1] onto [0, 1] for display.
pub fn display_score(coarse: f32) -> f32 {
    (coarse + 1.0) / 2.0
}

/// A coarse-search hit: the metadata record at `position` and its similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub position: usize,
    pub record: MetadataRecord,
    /// Raw inner product of the normalized query with the indexed vector.
    pub score: f32,
}

/// A candidate that survived fusion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub candidate: Candidate,
    /// Relevance from the reranker in its native scale; `None` when reranking did not happen.
    pub rerank_score: Option<f32>,
    /// `(coarse + 1) / 2`.
    pub display_score: f32,
}

impl RankedResult {
    /// A result ordered by coarse similarity only.
    pub fn coarse(candidate: Candidate) -> Self {
        let display_score = display_score(candidate.score);
        Self {
            candidate,
            rerank_score: None,
            display_score,
        }
    }

    /// A result placed by the reranker.
    pub fn reranked(candidate: Candidate, relevance: f32) -> Self {
        let display_score = display_score(candidate.score);
        Self {
            candidate,
            rerank_score: Some(relevance),
            display_score,
        }
    }

    pub fn record(&self) -> &MetadataRecord {
        &self.candidate.record
    }

    pub fn coarse_score(&self) -> f32 {
        self.candidate.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SceneRecord;

    fn candidate(score: f32) -> Candidate {
        Candidate {
            position: 0,
            record: MetadataRecord::Scene(SceneRecord::default()),
            score,
        }
    }

    #[test]
    fn display_score_endpoints() {
        assert_eq!(display_score(-1.0), 0.0);
        assert_eq!(display_score(0.0), 0.5);
        assert_eq!(display_score(1.0), 1.0);
    }

    #[test]
    fn coarse_result_has_no_rerank_score() {
        let r = RankedResult::coarse(candidate(0.6));
        assert_eq!(r.rerank_score, None);
        assert!((r.display_score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn reranked_result_keeps_native_relevance() {
        let r = RankedResult::reranked(candidate(-0.2), 7.5);
        assert_eq!(r.rerank_score, Some(7.5));
        assert!((r.display_score - 0.4).abs() < 1e-6);
    }
}
