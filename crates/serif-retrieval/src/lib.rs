//! # serif-retrieval
//!
//! The query engine. Two-stage pipeline: coarse vector search over an
//! overfetched pool, then external relevance reranking with graceful fallback.
//!
//! ## Architecture
//!
//! ```text
//! AppContext
//! ├── search_match / search_reply / search_scene
//! ├── present (SubtitleHit, ReplyHit, SceneHit, resolve_web_path)
//! └── RetrievalPipeline
//!     ├── IndexRegistry::resolve (default-scope fallback)
//!     ├── QueryEncoder::embed_query
//!     ├── ScopedVectorIndex::search (pool = ceil(top_k × overfetch))
//!     ├── RerankProvider (HttpReranker, soft failure)
//!     └── ranking::fuse (rerank order, or stable coarse order)
//! ```

pub mod pipeline;
pub mod present;
pub mod ranking;
pub mod rerank;
pub mod service;

pub use pipeline::{pool_size, RetrievalPipeline, RetrievalRequest};
pub use present::{resolve_web_path, ReplyHit, SceneHit, SubtitleHit};
pub use rerank::{create_reranker, HttpReranker};
pub use service::{AppContext, SceneSearchRequest, SearchRequest, SearchResponse};
