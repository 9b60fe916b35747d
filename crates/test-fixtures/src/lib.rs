//! Test fixtures for serif: mock providers, on-disk index writers, and a
//! minimal HTTP stub for exercising the real HTTP providers.

pub mod http_stub;
pub mod index_files;
pub mod mock_embedder;
pub mod mock_reranker;

pub use http_stub::{HttpStub, RecordedRequest, StubResponse};
pub use index_files::{
    write_flat_index, write_flat_ip_index, write_metadata, FAISS_METRIC_INNER_PRODUCT,
    FAISS_METRIC_L2,
};
pub use mock_embedder::{fixture_vector, MockEmbedder};
pub use mock_reranker::MockReranker;

use serif_core::models::{Candidate, MetadataRecord, SceneRecord};

/// A scene candidate with the given position, description and coarse score.
pub fn scene_candidate(position: usize, text: &str, score: f32) -> Candidate {
    Candidate {
        position,
        record: MetadataRecord::Scene(SceneRecord {
            text: text.to_string(),
            image_path: format!("scenes/{position}.jpg"),
        }),
        score,
    }
}

/// A unit vector along axis `axis` in `dims` dimensions.
pub fn axis(dims: usize, axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; dims];
    v[axis] = 1.0;
    v
}
