//! The count pipeline: open and stat the input, plan chunks, run a scan
//! engine, and hand the unique count back to `main` for reporting.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::thread;

use uniqip::chunk::plan_chunks;
use uniqip::scan::{scan_parallel, scan_sequential};

use super::args::Cli;

/// Run the count described by the CLI arguments and return the number of
/// distinct addresses. File-level failures surface here with path context;
/// per-line failures never do (the engines recover from those locally).
pub fn run_count(args: &Cli) -> Result<u64> {
    if args.path.as_os_str().is_empty() {
        return Err(anyhow!("input path must not be empty"));
    }

    if !args.parallel {
        log::info!("sequential scan of {}", args.path.display());
        return Ok(scan_sequential(&args.path)?);
    }

    let mut file = File::open(&args.path)
        .with_context(|| format!("failed to open {}", args.path.display()))?;
    let file_size = file
        .metadata()
        .with_context(|| format!("failed to stat {}", args.path.display()))?
        .len();

    let workers = clamp_workers(args.workers as usize);
    let ranges = plan_chunks(&mut file, file_size, workers)?;
    drop(file);

    log::info!(
        "parallel scan of {} ({} bytes, {} workers, {} ranges)",
        args.path.display(),
        file_size,
        workers,
        ranges.len()
    );

    Ok(scan_parallel(&args.path, &ranges)?)
}

/// Clamp the requested worker count to the host's available parallelism.
fn clamp_workers(requested: usize) -> usize {
    let max = thread::available_parallelism().map_or(1, |n| n.get());
    if requested > max {
        log::warn!(
            "requested {} workers exceeds the {} available cores, clamping",
            requested,
            max
        );
        max
    } else {
        requested.max(1)
    }
}
