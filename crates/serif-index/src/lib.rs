//! # serif-index
//!
//! Read-only vector indexes loaded from disk at startup.
//!
//! - [`FlatIpIndex`]: FAISS flat inner-product file reader and exact scan.
//! - [`ScopedVectorIndex`]: engine plus positionally aligned metadata.
//! - [`IndexRegistry`]: all loaded indexes keyed by kind and scope, with
//!   default-scope fallback.

pub mod flat;
pub mod metadata;
pub mod registry;
pub mod scoped;

pub use flat::{AnnIndex, FlatIpIndex, Neighbor, SENTINEL_LABEL};
pub use metadata::{load_metadata, parse_metadata, MetadataFile};
pub use registry::{IndexRegistry, IndexRegistryBuilder};
pub use scoped::ScopedVectorIndex;
