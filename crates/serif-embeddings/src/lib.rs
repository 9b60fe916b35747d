//! # serif-embeddings
//!
//! Query-to-vector encoding against a remote embedding service.
//!
//! ## Architecture
//!
//! ```text
//! QueryEncoder
//! ├── batching (fixed batch size B)
//! ├── bounded dispatch (Semaphore, width P, shared by all callers)
//! ├── reassembly by batch index
//! ├── QueryCache (moka, single-query memoization)
//! └── EmbeddingProvider
//!     └── ApiProvider (OpenAI-compatible /embeddings, retry + backoff)
//! ```

pub mod cache;
pub mod encoder;
pub mod providers;

pub use cache::QueryCache;
pub use encoder::QueryEncoder;
pub use providers::{create_provider, ApiProvider};
