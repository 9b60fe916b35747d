//! # serif-observability
//!
//! Structured logging for the retrieval core: subscriber setup plus one helper
//! per notable event, so field names stay consistent across crates.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing_from_config, try_init_tracing};
