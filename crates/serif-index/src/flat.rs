//! Exact inner-product index over a contiguous `f32` matrix.
//!
//! Reads FAISS `IndexFlatIP` files (`IxFI`, or the generic `IxFl` header
//! carrying the inner-product metric). Search is a brute-force scan with a
//! bounded min-heap; large indexes are scanned in parallel chunks.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::path::Path;

use rayon::prelude::*;
use serif_core::errors::IndexError;
use serif_core::vector::dot;

/// Label FAISS returns for padding slots when fewer than `k` vectors exist.
pub const SENTINEL_LABEL: i64 = -1;

const METRIC_INNER_PRODUCT: i32 = 0;
const PARALLEL_THRESHOLD: usize = 10_000;
const PARALLEL_CHUNK_ROWS: usize = 1024;

/// One search hit from an ANN engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row in the index, or [`SENTINEL_LABEL`].
    pub label: i64,
    pub score: f32,
}

/// A nearest-neighbour engine over fixed-dimension vectors.
///
/// `search` returns exactly `k` neighbours, best first, padded with
/// [`SENTINEL_LABEL`] when the index holds fewer than `k` vectors.
pub trait AnnIndex: Send + Sync {
    fn dimensions(&self) -> usize;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn search(&self, query: &[f32], k: usize) -> Vec<Neighbor>;
}

/// FAISS-compatible flat inner-product index held in memory.
#[derive(Debug, Clone)]
pub struct FlatIpIndex {
    dims: usize,
    data: Vec<f32>,
}

impl FlatIpIndex {
    /// Build from row vectors. Every row must have `dims` entries.
    pub fn from_vectors(dims: usize, rows: &[Vec<f32>]) -> Result<Self, IndexError> {
        if let Some(bad) = rows.iter().find(|r| r.len() != dims) {
            return Err(IndexError::DimensionMismatch {
                expected: dims,
                actual: bad.len(),
            });
        }
        Ok(Self {
            dims,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    /// Read a FAISS flat index file.
    pub fn read(path: &Path) -> Result<Self, IndexError> {
        let display = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| IndexError::Io {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        Self::parse(&bytes, &display)
    }

    fn parse(bytes: &[u8], path: &str) -> Result<Self, IndexError> {
        let mut r = ByteReader { bytes, pos: 0, path };

        let fourcc = r.take(4)?;
        match fourcc {
            b"IxFI" | b"IxFl" => {}
            other => {
                return Err(IndexError::UnsupportedFormat {
                    path: path.to_string(),
                    reason: format!(
                        "index type {:?} is not a flat inner-product index",
                        String::from_utf8_lossy(other)
                    ),
                })
            }
        }

        let d = r.i32()?;
        let ntotal = r.i64()?;
        let _dummy_a = r.i64()?;
        let _dummy_b = r.i64()?;
        let _is_trained = r.u8()?;
        let metric = r.i32()?;
        if metric > 1 {
            let _metric_arg = r.f32()?;
        }

        if metric != METRIC_INNER_PRODUCT {
            return Err(IndexError::UnsupportedFormat {
                path: path.to_string(),
                reason: format!("metric type {metric} is not inner product"),
            });
        }
        if d <= 0 || ntotal < 0 {
            return Err(r.corrupt(format!("invalid header: d={d}, ntotal={ntotal}")));
        }
        let dims = d as usize;
        let rows = ntotal as usize;

        let count = r.u64()? as usize;
        let expected = rows
            .checked_mul(dims)
            .ok_or_else(|| r.corrupt("ntotal * d overflows".to_string()))?;
        if count != expected {
            return Err(r.corrupt(format!(
                "code count {count} does not match ntotal * d = {expected}"
            )));
        }

        let raw = r.take(count.saturating_mul(4))?;
        let data = raw
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self { dims, data })
    }

    fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dims..(i + 1) * self.dims]
    }

    fn scan(&self, query: &[f32], k: usize, rows: std::ops::Range<usize>) -> Vec<Scored> {
        let mut heap = BinaryHeap::with_capacity(k.min(rows.len()) + 1);
        for i in rows {
            heap.push(Reverse(Scored {
                score: dot(self.row(i), query),
                label: i as i64,
            }));
            if heap.len() > k {
                heap.pop();
            }
        }
        heap.into_iter().map(|r| r.0).collect()
    }
}

impl AnnIndex for FlatIpIndex {
    fn dimensions(&self) -> usize {
        self.dims
    }

    fn len(&self) -> usize {
        self.data.len() / self.dims.max(1)
    }

    fn search(&self, query: &[f32], k: usize) -> Vec<Neighbor> {
        if k == 0 {
            return Vec::new();
        }
        let n = self.len();

        let mut hits = if n >= PARALLEL_THRESHOLD {
            let starts: Vec<usize> = (0..n).step_by(PARALLEL_CHUNK_ROWS).collect();
            let partial: Vec<Vec<Scored>> = starts
                .par_iter()
                .map(|&start| self.scan(query, k, start..(start + PARALLEL_CHUNK_ROWS).min(n)))
                .collect();
            let mut merged = BinaryHeap::with_capacity(k.min(n) + 1);
            for entry in partial.into_iter().flatten() {
                merged.push(Reverse(entry));
                if merged.len() > k {
                    merged.pop();
                }
            }
            merged.into_iter().map(|r| r.0).collect()
        } else {
            self.scan(query, k, 0..n)
        };

        hits.sort_by(|a, b| b.cmp(a));
        let mut out: Vec<Neighbor> = hits
            .into_iter()
            .map(|s| Neighbor {
                label: s.label,
                score: s.score,
            })
            .collect();
        out.resize(
            k,
            Neighbor {
                label: SENTINEL_LABEL,
                score: f32::NEG_INFINITY,
            },
        );
        out
    }
}

/// Heap entry. Higher score wins; on equal scores the lower label wins.
#[derive(Debug, Clone, Copy)]
struct Scored {
    score: f32,
    label: i64,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.label.cmp(&self.label))
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    path: &'a str,
}

impl<'a> ByteReader<'a> {
    fn corrupt(&self, reason: String) -> IndexError {
        IndexError::Corrupt {
            path: self.path.to_string(),
            reason,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], IndexError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                self.corrupt(format!(
                    "truncated at byte {}: wanted {n} more, {} left",
                    self.pos,
                    self.bytes.len() - self.pos
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], IndexError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, IndexError> {
        Ok(self.array::<1>()?[0])
    }

    fn i32(&mut self) -> Result<i32, IndexError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn i64(&mut self) -> Result<i64, IndexError> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64, IndexError> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    fn f32(&mut self) -> Result<f32, IndexError> {
        Ok(f32::from_le_bytes(self.array()?))
    }
}
