//! Line-aligned file partitioning for parallel scanning.
//!
//! The planner splits a file into byte ranges that tile it exactly (no gaps,
//! no overlaps) with every interior boundary landing immediately after a line
//! terminator. Workers can then scan their ranges independently: no line is
//! split across two ranges and no line is read twice.

use crate::error::{Result, UniqipError};
use std::io::{Read, Seek, SeekFrom};

/// Half-open interval `[start, end)` of file offsets assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `file_size` bytes into `parts` line-aligned ranges.
///
/// Each range is approximately `file_size / parts` bytes; the last absorbs
/// the remainder. Interior boundaries are snapped forward to just past the
/// next `\n`, scanning through `reader`, so boundaries must be computed
/// sequentially: each range starts exactly where the previous one ended.
///
/// Edge cases: a zero-size file yields one empty range; a boundary search
/// that reaches end-of-file without finding a terminator stops there, so a
/// missing trailing newline is tolerated. A single line longer than the
/// naive span swallows the following boundaries and leaves those ranges
/// empty, which preserves the tiling invariant.
pub fn plan_chunks<R: Read + Seek>(
    reader: &mut R,
    file_size: u64,
    parts: usize,
) -> Result<Vec<ByteRange>> {
    if parts == 0 {
        return Err(UniqipError::validation(
            "chunk plan requires at least one worker",
        ));
    }
    if file_size == 0 {
        return Ok(vec![ByteRange { start: 0, end: 0 }]);
    }

    let span = file_size / parts as u64;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0u64;

    for i in 0..parts {
        let end = if i == parts - 1 {
            file_size
        } else {
            // Previous snaps may already have consumed past this range's
            // naive share; an empty range is fine, a regression is not.
            let naive = (start + span).min(file_size);
            snap_past_terminator(reader, naive, file_size)?
        };
        ranges.push(ByteRange { start, end });
        start = end;
    }

    Ok(ranges)
}

/// Advance `from` to the offset just past the next `\n`, or to end-of-file.
fn snap_past_terminator<R: Read + Seek>(
    reader: &mut R,
    from: u64,
    file_size: u64,
) -> Result<u64> {
    if from >= file_size {
        return Ok(file_size);
    }

    reader.seek(SeekFrom::Start(from))?;
    let mut pos = from;
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Ok(file_size);
        }
        if let Some(offset) = buf[..n].iter().position(|&b| b == b'\n') {
            return Ok(pos + offset as u64 + 1);
        }
        pos += n as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn plan(data: &[u8], parts: usize) -> Vec<ByteRange> {
        let mut cursor = Cursor::new(data.to_vec());
        plan_chunks(&mut cursor, data.len() as u64, parts).unwrap()
    }

    /// Ranges must tile `[0, size)` exactly and every interior boundary must
    /// sit immediately after a `\n` (or at end-of-file).
    fn assert_partition_invariant(data: &[u8], ranges: &[ByteRange]) {
        let size = data.len() as u64;
        assert!(!ranges.is_empty());
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges.last().unwrap().end, size);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap at boundary");
        }
        let total: u64 = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(total, size, "chunk lengths must sum to file size");
        for r in &ranges[..ranges.len() - 1] {
            let b = r.end;
            assert!(
                b == size || (b > 0 && data[b as usize - 1] == b'\n'),
                "boundary {} does not follow a line terminator",
                b
            );
        }
    }

    #[test]
    fn test_single_part_covers_whole_file() {
        let data = b"10.0.0.1\n10.0.0.2\n";
        let ranges = plan(data, 1);
        assert_eq!(ranges, vec![ByteRange { start: 0, end: 18 }]);
    }

    #[test]
    fn test_zero_size_file_yields_one_empty_range() {
        let mut cursor = Cursor::new(Vec::new());
        let ranges = plan_chunks(&mut cursor, 0, 4).unwrap();
        assert_eq!(ranges, vec![ByteRange { start: 0, end: 0 }]);
    }

    #[test]
    fn test_zero_parts_is_rejected() {
        let mut cursor = Cursor::new(b"x\n".to_vec());
        assert!(plan_chunks(&mut cursor, 2, 0).is_err());
    }

    #[test]
    fn test_boundaries_land_after_terminators() {
        let data = b"1.1.1.1\n2.2.2.2\n3.3.3.3\n4.4.4.4\n";
        for parts in 1..=6 {
            let ranges = plan(data, parts);
            assert_eq!(ranges.len(), parts);
            assert_partition_invariant(data, &ranges);
        }
    }

    #[test]
    fn test_indivisible_size_still_tiles_exactly() {
        // 23 bytes across 4 workers: span 5, remainder absorbed at the end.
        let data = b"10.0.0.1\n1.2.3.4\nx\ny\nz\n";
        assert_eq!(data.len(), 23);
        for parts in 1..=5 {
            let ranges = plan(data, parts);
            assert_partition_invariant(data, &ranges);
        }
    }

    #[test]
    fn test_missing_trailing_newline() {
        let data = b"1.1.1.1\n2.2.2.2\n3.3.3.3";
        for parts in 1..=4 {
            let ranges = plan(data, parts);
            assert_partition_invariant(data, &ranges);
        }
    }

    #[test]
    fn test_line_longer_than_span_leaves_empty_tail_ranges() {
        // One long line and a short one: the first snap consumes most of the
        // file, later ranges may be empty but the tiling must hold.
        let mut data = vec![b'a'; 100];
        data.push(b'\n');
        data.extend_from_slice(b"1.1.1.1\n");
        let ranges = plan(&data, 8);
        assert_eq!(ranges.len(), 8);
        assert_partition_invariant(&data, &ranges);
        assert!(ranges.iter().any(|r| r.is_empty()));
    }

    #[test]
    fn test_no_terminators_at_all() {
        let data = b"not a single newline here";
        let ranges = plan(data, 3);
        assert_partition_invariant(data, &ranges);
        // Everything belongs to the first worker.
        assert_eq!(ranges[0], ByteRange { start: 0, end: data.len() as u64 });
    }

    #[test]
    fn test_more_parts_than_lines() {
        let data = b"9.9.9.9\n";
        let ranges = plan(data, 4);
        assert_eq!(ranges.len(), 4);
        assert_partition_invariant(data, &ranges);
    }
}
