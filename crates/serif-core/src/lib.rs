//! # serif-core
//!
//! Foundation crate for the serif retrieval system.
//! Defines the shared types, provider traits, errors, config, and defaults.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;
pub mod vector;

// Re-export the most commonly used types at the crate root.
pub use config::SerifConfig;
pub use errors::{SerifError, SerifResult};
pub use models::{
    Candidate, IndexKind, MetadataRecord, RankedResult, RerankHit, RerankOutcome, ScopeId,
};
