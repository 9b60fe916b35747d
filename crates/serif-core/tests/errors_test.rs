use serif_core::errors::*;

#[test]
fn embedding_bad_status_carries_code_and_body() {
    let err = EmbeddingError::BadStatus {
        status: 429,
        body: "throttled".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("429"));
    assert!(msg.contains("throttled"));
}

#[test]
fn dimension_mismatch_carries_values() {
    let err = IndexError::DimensionMismatch {
        expected: 1024,
        actual: 768,
    };
    let msg = err.to_string();
    assert!(msg.contains("1024"));
    assert!(msg.contains("768"));
}

#[test]
fn config_validation_carries_field() {
    let err = ConfigError::ValidationFailed {
        field: "embedding.parallelism".into(),
        message: "must be greater than 0".into(),
    };
    assert!(err.to_string().contains("embedding.parallelism"));
}

// --- From impls ---

#[test]
fn embedding_error_converts_to_serif_error() {
    let err: SerifError = EmbeddingError::RequestFailed {
        reason: "connection refused".into(),
    }
    .into();
    assert!(matches!(err, SerifError::Embedding(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn index_error_converts_to_serif_error() {
    let err: SerifError = IndexError::Corrupt {
        path: "match.index".into(),
        reason: "truncated".into(),
    }
    .into();
    assert!(matches!(err, SerifError::Index(_)));
}

#[test]
fn config_error_converts_to_serif_error() {
    let err: SerifError = ConfigError::FileNotFound {
        path: "serif.toml".into(),
    }
    .into();
    assert!(matches!(err, SerifError::Config(_)));
}
