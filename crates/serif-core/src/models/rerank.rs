/// One reranked document: its position in the submitted list and its relevance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankHit {
    pub index: usize,
    pub relevance: f32,
}

/// Result of a rerank attempt.
///
/// Reranking is never fatal: every failure mode maps to `Unavailable`, which
/// the pipeline treats exactly like an empty ranking.
#[derive(Debug, Clone, PartialEq)]
pub enum RerankOutcome {
    Ranked(Vec<RerankHit>),
    Unavailable { reason: String },
}

impl RerankOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Collapse to the hit list; `Unavailable` becomes empty.
    pub fn into_hits(self) -> Vec<RerankHit> {
        match self {
            Self::Ranked(hits) => hits,
            Self::Unavailable { .. } => Vec::new(),
        }
    }
}
