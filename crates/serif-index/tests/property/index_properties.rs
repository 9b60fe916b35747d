use proptest::prelude::*;
use serif_core::models::{IndexKind, MetadataRecord, SceneRecord};
use serif_index::{AnnIndex, FlatIpIndex, ScopedVectorIndex, SENTINEL_LABEL};

const DIMS: usize = 4;

fn arb_rows() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, DIMS), 0..60)
}

fn arb_query() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, DIMS)
}

fn records(n: usize) -> Vec<MetadataRecord> {
    (0..n)
        .map(|i| {
            MetadataRecord::Scene(SceneRecord {
                text: format!("scene {i}"),
                image_path: format!("{i}.jpg"),
            })
        })
        .collect()
}

// ── Engine returns exactly k, best first ─────────────────────────────────

proptest! {
    #[test]
    fn engine_returns_k_sorted(rows in arb_rows(), query in arb_query(), k in 0usize..80) {
        let index = FlatIpIndex::from_vectors(DIMS, &rows).unwrap();
        let hits = index.search(&query, k);

        prop_assert_eq!(hits.len(), k);
        let real: Vec<_> = hits.iter().filter(|n| n.label != SENTINEL_LABEL).collect();
        prop_assert_eq!(real.len(), k.min(rows.len()));
        for pair in real.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}

// ── Scoped search never leaves the logical range ─────────────────────────

proptest! {
    #[test]
    fn scoped_search_stays_in_logical_range(
        rows in arb_rows(),
        meta_len in 0usize..60,
        query in arb_query(),
        k in 0usize..80,
    ) {
        let engine = FlatIpIndex::from_vectors(DIMS, &rows).unwrap();
        let index = ScopedVectorIndex::from_parts(IndexKind::Scene, Box::new(engine), records(meta_len));
        let logical = rows.len().min(meta_len);

        let hits = index.search(&query, k).unwrap();

        prop_assert_eq!(index.logical_size(), logical);
        prop_assert!(hits.len() <= k);
        prop_assert!(hits.iter().all(|c| c.position < logical));
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
