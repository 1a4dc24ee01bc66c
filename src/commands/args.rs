//! Command-line argument definitions for the uniqip CLI.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "uniqip")]
#[command(about = "Count distinct IPv4 addresses in a newline-delimited file")]
#[command(
    long_about = "Uniqip: counts the distinct IPv4 addresses in a large text file \
(one dotted-quad per line) using a dense 512 MiB bitmap instead of a hash set, \
so memory use is flat regardless of input size.

Blank lines are ignored; malformed lines are logged to stderr and skipped. \
The final line may lack a trailing newline."
)]
#[command(after_help = "EXAMPLES:
  # Single-threaded scan
  uniqip --path ips.txt

  # Parallel scan with 8 workers (clamped to the available cores)
  uniqip --path ips.txt --parallel --workers 8")]
pub struct Cli {
    /// Path to the input file (one IPv4 address per line)
    #[arg(short, long)]
    pub path: PathBuf,

    /// Scan the file in parallel across multiple worker threads
    #[arg(long)]
    pub parallel: bool,

    /// Requested worker count for parallel mode; values above the number of
    /// available cores are clamped down
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,

    /// Enable verbose progress output with timestamps
    #[arg(short, long)]
    pub verbose: bool,
}
