//! Decoration projection.
//!
//! Pure functions mapping the metadata store onto the currently focused
//! source file: the line ranges to mark visually, and the record backing a
//! hover query. Recomputation is always a full rebuild over the per-file
//! record list, which stays in the tens to low hundreds of entries.

use crate::store::{MetadataMap, Recording};

use serde::Serialize;

/// A zero-based inclusive line range to decorate.
///
/// Stored records carry 1-based lines; decorations use the editor's
/// zero-based convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRange {
    /// Zero-based inclusive start line.
    pub start_line: u32,
    /// Zero-based inclusive end line.
    pub end_line: u32,
}

/// Compute the decoration ranges for a source file.
///
/// One range per record in stored order; overlapping records each produce
/// their own range, no merging or de-duplication.
pub fn compute_ranges(metadata: &MetadataMap, source_file: &str) -> Vec<LineRange> {
    metadata
        .get(source_file)
        .map(|records| {
            records
                .iter()
                .map(|r| LineRange {
                    start_line: r.start_line.saturating_sub(1),
                    end_line: r.end_line.saturating_sub(1),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Find the record backing a hover at a zero-based line.
///
/// Returns the first record (in stored order) whose inclusive 1-based range
/// contains `line + 1`; first match is the tie-break for overlaps. A line at
/// the integer boundary cannot have a 1-based counterpart and finds nothing.
pub fn find_record_at<'a>(
    metadata: &'a MetadataMap,
    source_file: &str,
    line: u32,
) -> Option<&'a Recording> {
    let line = line.checked_add(1)?;
    metadata
        .get(source_file)?
        .iter()
        .find(|r| r.start_line <= line && line <= r.end_line)
}
