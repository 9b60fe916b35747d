//! ScopedVectorIndex: an ANN engine paired with positionally aligned metadata.

use std::path::Path;

use serif_core::errors::{IndexError, SerifResult};
use serif_core::models::{Candidate, IndexKind, MetadataRecord};
use serif_core::vector::normalize_l2;
use serif_observability::events;

use crate::flat::{AnnIndex, FlatIpIndex};
use crate::metadata::load_metadata;

/// One searchable collection. Immutable after construction.
pub struct ScopedVectorIndex {
    kind: IndexKind,
    engine: Box<dyn AnnIndex>,
    records: Vec<MetadataRecord>,
    logical_size: usize,
}

impl std::fmt::Debug for ScopedVectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedVectorIndex")
            .field("kind", &self.kind)
            .field("dimensions", &self.engine.dimensions())
            .field("vectors", &self.engine.len())
            .field("records", &self.records.len())
            .finish()
    }
}

impl ScopedVectorIndex {
    /// Pair an engine with its records.
    pub fn from_parts(
        kind: IndexKind,
        engine: Box<dyn AnnIndex>,
        records: Vec<MetadataRecord>,
    ) -> Self {
        let logical_size = engine.len().min(records.len());
        Self {
            kind,
            engine,
            records,
            logical_size,
        }
    }

    /// Load the index file and metadata sidecar for `kind`.
    pub fn open(kind: IndexKind, index_path: &Path, meta_path: &Path) -> Result<Self, IndexError> {
        let engine = FlatIpIndex::read(index_path)?;
        let meta = load_metadata(kind, meta_path)?;
        if meta.skipped > 0 {
            events::metadata_lines_skipped(&meta_path.display().to_string(), meta.skipped);
        }
        Ok(Self::from_parts(kind, Box::new(engine), meta.records))
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn dimensions(&self) -> usize {
        self.engine.dimensions()
    }

    /// Number of vectors in the engine, including any without metadata.
    pub fn vector_count(&self) -> usize {
        self.engine.len()
    }

    /// `min(vectors, records)`: the number of searchable positions.
    pub fn logical_size(&self) -> usize {
        self.logical_size
    }

    pub fn record(&self, position: usize) -> Option<&MetadataRecord> {
        if position < self.logical_size {
            self.records.get(position)
        } else {
            None
        }
    }

    /// Nearest candidates to `query`, best first, at most `top_k`.
    ///
    /// The query is normalized to unit length before the scan. Sentinels and
    /// positions without metadata are dropped.
    pub fn search(&self, query: &[f32], top_k: usize) -> SerifResult<Vec<Candidate>> {
        let dims = self.engine.dimensions();
        if query.len() != dims {
            return Err(IndexError::DimensionMismatch {
                expected: dims,
                actual: query.len(),
            }
            .into());
        }
        if top_k == 0 || self.logical_size == 0 {
            return Ok(Vec::new());
        }

        let mut q = query.to_vec();
        normalize_l2(&mut q);

        let candidates = self
            .engine
            .search(&q, top_k.min(self.engine.len()))
            .into_iter()
            .filter_map(|n| {
                let position = usize::try_from(n.label).ok()?;
                let record = self.record(position)?;
                Some(Candidate {
                    position,
                    record: record.clone(),
                    score: n.score,
                })
            })
            .collect();
        Ok(candidates)
    }
}
