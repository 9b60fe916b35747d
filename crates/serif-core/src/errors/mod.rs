//! Error handling for serif.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod embedding_error;
pub mod index_error;
pub mod serif_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use serif_error::{SerifError, SerifResult};
