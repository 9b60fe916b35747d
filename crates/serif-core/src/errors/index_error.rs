/// Vector index errors: malformed artifacts at load time and bad queries at search time.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("unsupported index format in {path}: {reason}")]
    UnsupportedFormat { path: String, reason: String },

    #[error("corrupt index {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("query dimension mismatch: index has {expected}, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
