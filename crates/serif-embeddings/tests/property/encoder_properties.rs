use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use serif_embeddings::QueryEncoder;
use test_fixtures::{fixture_vector, MockEmbedder};

const DIMS: usize = 6;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

/// Per-batch latency derived from the batch content, so completion order is
/// scrambled relative to dispatch order.
fn jitter(batch: &[String]) -> Duration {
    let sum: usize = batch.iter().flat_map(|t| t.bytes()).map(usize::from).sum();
    Duration::from_millis((sum % 5) as u64)
}

// ── Output order is input order regardless of completion order ───────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn output_matches_input_order(
        input in prop::collection::vec("[a-z]{1,12}", 0..40),
        batch_size in 1usize..7,
        parallelism in 1usize..5,
    ) {
        let mock = Arc::new(MockEmbedder::new(DIMS).with_delay_fn(jitter));
        let encoder = QueryEncoder::new(mock.clone(), batch_size, parallelism);

        let out = runtime().block_on(encoder.encode(&input)).unwrap();

        prop_assert_eq!(out.len(), input.len());
        for (text, vector) in input.iter().zip(&out) {
            prop_assert_eq!(vector, &fixture_vector(text, DIMS));
        }
        prop_assert_eq!(mock.calls(), input.len().div_ceil(batch_size));
        prop_assert!(mock.max_in_flight() <= parallelism);
    }
}
