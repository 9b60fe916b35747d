pub mod fusion;

pub use fusion::{coarse_order, fuse, rerank_order};
