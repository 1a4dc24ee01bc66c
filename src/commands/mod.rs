//! Command-line interface definitions and the count pipeline for the uniqip
//! binary.

pub mod args;
pub mod count;

pub use args::Cli;
pub use count::run_count;
