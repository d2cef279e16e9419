use crate::{MetadataMap, Recording, compute_ranges, find_record_at};

fn record(id: &str, source_file: &str, start_line: u32, end_line: u32) -> Recording {
    Recording {
        id: id.to_string(),
        audio_file: format!("recordings/{id}.wav"),
        source_file: source_file.to_string(),
        language: "rust".to_string(),
        start_line,
        end_line,
        timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        duration: 2,
    }
}

fn metadata_with(records: Vec<Recording>) -> MetadataMap {
    let mut map = MetadataMap::new();
    for r in records {
        map.entry(r.source_file.clone()).or_default().push(r);
    }
    map
}

/// WHAT: Stored 1-based ranges project to zero-based decoration ranges
/// WHY: Records use editor-visible 1-based lines, decorations zero-based
#[test]
fn given_stored_ranges_when_computing_then_zero_based_in_stored_order() {
    // Given: Two records for one file in save order
    let map = metadata_with(vec![
        record("rec-1", "/proj/a.rs", 10, 12),
        record("rec-2", "/proj/a.rs", 3, 3),
    ]);

    // When: Computing decoration ranges
    let ranges = compute_ranges(&map, "/proj/a.rs");

    // Then: Each range is converted and order is preserved
    assert_eq!(ranges.len(), 2);
    assert_eq!((ranges[0].start_line, ranges[0].end_line), (9, 11));
    assert_eq!((ranges[1].start_line, ranges[1].end_line), (2, 2));
}

/// WHAT: Converting a stored range to zero-based and back reproduces it
/// WHY: The 1-based/0-based round-trip law of the projection
#[test]
fn given_valid_range_when_round_tripping_then_original_reproduced() {
    for (start, end) in [(1, 1), (1, 5), (10, 12), (100, 250)] {
        // Given: A record with a valid 1-based range
        let map = metadata_with(vec![record("rec-1", "/proj/a.rs", start, end)]);

        // When: Projecting and applying the inverse conversion
        let ranges = compute_ranges(&map, "/proj/a.rs");

        // Then: The original 1-based range is reproduced
        assert_eq!((ranges[0].start_line + 1, ranges[0].end_line + 1), (start, end));
    }
}

/// WHAT: Overlapping records each keep their own decoration range
/// WHY: No merging or de-overlap is performed
#[test]
fn given_overlapping_records_when_computing_then_no_merging() {
    // Given: Two overlapping records
    let map = metadata_with(vec![
        record("rec-1", "/proj/a.rs", 5, 10),
        record("rec-2", "/proj/a.rs", 8, 12),
    ]);

    // When: Computing decoration ranges
    let ranges = compute_ranges(&map, "/proj/a.rs");

    // Then: Both ranges survive independently
    assert_eq!(ranges.len(), 2);
}

/// WHAT: A file with no records yields no decoration ranges
/// WHY: Unannotated files must not be decorated
#[test]
fn given_unknown_file_when_computing_then_empty() {
    let map = metadata_with(vec![record("rec-1", "/proj/a.rs", 1, 2)]);

    assert!(compute_ranges(&map, "/proj/other.rs").is_empty());
}

/// WHAT: Hover lookup returns the first record covering the line
/// WHY: First match in stored order is the tie-break for overlaps
#[test]
fn given_overlapping_records_when_finding_then_first_match_wins() {
    // Given: Two records both covering 1-based line 9
    let map = metadata_with(vec![
        record("rec-1", "/proj/a.rs", 5, 10),
        record("rec-2", "/proj/a.rs", 8, 12),
    ]);

    // When: Resolving a hover at zero-based line 8 (1-based 9)
    let found = find_record_at(&map, "/proj/a.rs", 8).unwrap();

    // Then: The earlier-stored record is returned
    assert_eq!(found.id, "rec-1");
}

/// WHAT: Repeated hover lookups with unchanged metadata agree
/// WHY: find_record_at is idempotent
#[test]
fn given_unchanged_metadata_when_finding_twice_then_same_result() {
    let map = metadata_with(vec![record("rec-1", "/proj/a.rs", 5, 10)]);

    let first = find_record_at(&map, "/proj/a.rs", 6).map(|r| r.id.clone());
    let second = find_record_at(&map, "/proj/a.rs", 6).map(|r| r.id.clone());

    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("rec-1"));
}

/// WHAT: The maximum zero-based line resolves to no record
/// WHY: The 1-based conversion must not wrap at the integer boundary
#[test]
fn given_max_line_when_finding_then_none() {
    // Given: A record covering the widest expressible range
    let map = metadata_with(vec![record("rec-1", "/proj/a.rs", 1, u32::MAX)]);

    // Then: The boundary line finds nothing instead of wrapping
    assert!(find_record_at(&map, "/proj/a.rs", u32::MAX).is_none());
    assert!(find_record_at(&map, "/proj/a.rs", u32::MAX - 1).is_some());
}

/// WHAT: Lines outside every range resolve to no record
/// WHY: Hovers must only appear over annotated lines
#[test]
fn given_uncovered_line_when_finding_then_none() {
    // Given: A record covering 1-based lines 5..=10
    let map = metadata_with(vec![record("rec-1", "/proj/a.rs", 5, 10)]);

    // Then: Zero-based lines just outside the range find nothing,
    // boundaries find the record
    assert!(find_record_at(&map, "/proj/a.rs", 3).is_none());
    assert!(find_record_at(&map, "/proj/a.rs", 10).is_none());
    assert!(find_record_at(&map, "/proj/a.rs", 4).is_some());
    assert!(find_record_at(&map, "/proj/a.rs", 9).is_some());
}
