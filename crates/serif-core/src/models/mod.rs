pub mod candidate;
pub mod index_kind;
pub mod record;
pub mod rerank;
pub mod scope;

pub use candidate::{display_score, Candidate, RankedResult};
pub use index_kind::IndexKind;
pub use record::{
    EpisodeRef, LineRecord, MetadataRecord, RawAnswerRecord, ReplyRecord, SceneRecord,
};
pub use rerank::{RerankHit, RerankOutcome};
pub use scope::ScopeId;
