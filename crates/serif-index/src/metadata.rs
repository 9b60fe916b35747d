//! JSON-lines metadata sidecar loading.
//!
//! Record `i` describes vector `i`. Blank lines and lines that are not a JSON
//! object are dropped, so the record list can be shorter than the vector list.
//! Any JSON object becomes a record, with unusable fields defaulted.

use std::path::Path;

use serif_core::errors::IndexError;
use serif_core::models::{IndexKind, MetadataRecord};
use tracing::debug;

/// Records parsed from one metadata file.
#[derive(Debug, Clone, Default)]
pub struct MetadataFile {
    pub records: Vec<MetadataRecord>,
    /// Non-blank lines that were not a JSON object.
    pub skipped: usize,
}

/// Load and parse `path` as `kind` records.
pub fn load_metadata(kind: IndexKind, path: &Path) -> Result<MetadataFile, IndexError> {
    let content = std::fs::read_to_string(path).map_err(|e| IndexError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(parse_metadata(kind, &content))
}

/// Parse JSON-lines `content` as `kind` records.
pub fn parse_metadata(kind: IndexKind, content: &str) -> MetadataFile {
    let mut file = MetadataFile::default();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match kind.parse_record(line) {
            Ok(record) => file.records.push(record),
            Err(e) => {
                debug!(kind = %kind, line = line_no + 1, error = %e, "skipping metadata line");
                file.skipped += 1;
            }
        }
    }
    file
}
