use clap::Parser;
use std::time::Instant;

mod commands;

use commands::{run_count, Cli};
use uniqip::logging;
use uniqip::stats::MemoryUsage;

fn main() {
    let args = Cli::parse();
    logging::init_logger(args.verbose);
    let start = Instant::now();

    match run_count(&args) {
        Ok(count) => {
            println!("Unique addresses: {}", count);
            println!("Total time: {:.3?}", start.elapsed());
            println!("Memory: {}", MemoryUsage::snapshot());
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            println!("Total time: {:.3?}", start.elapsed());
            std::process::exit(1);
        }
    }
}
