//! Writers for on-disk index fixtures: FAISS flat index files and JSONL
//! metadata sidecars.

use std::fs;
use std::io;
use std::path::Path;

/// FAISS `METRIC_INNER_PRODUCT`.
pub const FAISS_METRIC_INNER_PRODUCT: i32 = 0;
/// FAISS `METRIC_L2`.
pub const FAISS_METRIC_L2: i32 = 1;

/// Write a FAISS flat index (`fourcc` + header + codes) to `path`.
pub fn write_flat_index(
    path: &Path,
    fourcc: &[u8; 4],
    metric: i32,
    dims: usize,
    vectors: &[Vec<f32>],
) -> io::Result<()> {
    let mut out = Vec::new();
    out.extend_from_slice(fourcc);
    out.extend_from_slice(&(dims as i32).to_le_bytes());
    out.extend_from_slice(&(vectors.len() as i64).to_le_bytes());
    out.extend_from_slice(&(1i64 << 20).to_le_bytes());
    out.extend_from_slice(&(1i64 << 20).to_le_bytes());
    out.push(1);
    out.extend_from_slice(&metric.to_le_bytes());
    if metric > 1 {
        out.extend_from_slice(&0f32.to_le_bytes());
    }
    let floats: Vec<f32> = vectors.iter().flatten().copied().collect();
    out.extend_from_slice(&(floats.len() as u64).to_le_bytes());
    for f in floats {
        out.extend_from_slice(&f.to_le_bytes());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, out)
}

/// Write an inner-product `IndexFlatIP` file.
pub fn write_flat_ip_index(path: &Path, dims: usize, vectors: &[Vec<f32>]) -> io::Result<()> {
    write_flat_index(path, b"IxFI", FAISS_METRIC_INNER_PRODUCT, dims, vectors)
}

/// Write `lines` verbatim, one per line, to `path`.
pub fn write_metadata(path: &Path, lines: &[&str]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(path, body)
}
