//! Sequential and parallel scan engines.
//!
//! Both engines stream lines through the address codec into a dense
//! membership set and report the final popcount. The parallel engine runs one
//! rayon task per planned byte range; every worker owns a private set and the
//! per-worker sets are folded with a bitwise OR after all workers have
//! joined. Because membership is commutative and idempotent, the count is
//! identical for every worker count and every scheduling order.

use crate::bitmap::MembershipSet;
use crate::chunk::ByteRange;
use crate::codec::parse_ipv4;
use crate::error::{Result, UniqipError};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Single-threaded scan: one pass, one membership set, no chunking.
///
/// The running counter is bumped only on first observations, so the result
/// equals the final popcount without a second pass over the bitmap. Serves as
/// the correctness oracle for [`scan_parallel`].
pub fn scan_sequential(path: &Path) -> Result<u64> {
    let mut set = MembershipSet::for_address_space()?;
    let file = File::open(path).map_err(|e| UniqipError::io(path, "open", e))?;
    let mut reader = BufReader::new(file);

    let mut unique = 0u64;
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| UniqipError::io(path, "read", e))?;
        if n == 0 {
            break;
        }
        match record_line(&line, &mut set) {
            Some(false) => unique += 1,
            Some(true) | None => {}
        }
    }

    Ok(unique)
}

/// Parallel scan over pre-planned, line-aligned byte ranges.
///
/// One worker per range, fork-join: the `collect` is the barrier, no set is
/// merged while a worker may still be writing it. A failure in any worker
/// aborts the whole scan; a partial count is never returned.
pub fn scan_parallel(path: &Path, ranges: &[ByteRange]) -> Result<u64> {
    let sets = ranges
        .par_iter()
        .map(|range| scan_range(path, *range))
        .collect::<Result<Vec<MembershipSet>>>()?;

    let mut iter = sets.into_iter();
    let mut merged = match iter.next() {
        Some(set) => set,
        None => return Ok(0),
    };
    for set in iter {
        merged.merge_or(&set);
    }
    Ok(merged.count_set())
}

/// Scan one byte range into a freshly allocated membership set.
fn scan_range(path: &Path, range: ByteRange) -> Result<MembershipSet> {
    let mut set = MembershipSet::for_address_space()?;
    if range.is_empty() {
        return Ok(set);
    }

    let mut file = File::open(path).map_err(|e| UniqipError::io(path, "open", e))?;
    file.seek(SeekFrom::Start(range.start))
        .map_err(|e| UniqipError::io(path, "seek", e))?;

    // The planner guarantees range.start sits at the beginning of a line, so
    // the first line is scanned as-is. Skipping a "partial" first line here
    // would silently drop one address per chunk boundary.
    let mut reader = BufReader::new(file).take(range.len());
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| UniqipError::io(path, "read", e))?;
        if n == 0 {
            break;
        }
        record_line(&line, &mut set);
    }

    Ok(set)
}

/// Parse one raw line and record it in `set`.
///
/// Returns `None` for blank or malformed lines (malformed ones are logged and
/// skipped, never fatal), otherwise the duplicate flag from `test_and_set`.
#[inline]
fn record_line(raw: &str, set: &mut MembershipSet) -> Option<bool> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    match parse_ipv4(text) {
        Ok(key) => Some(set.test_and_set(key)),
        Err(err) => {
            log::warn!("skipping line: {}", err);
            None
        }
    }
}
