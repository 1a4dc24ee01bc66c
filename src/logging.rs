use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Initialize the logger with a format stamping each record with the elapsed
/// run time.
///
/// Verbose mode enables Info, otherwise only warnings and errors get through
/// (malformed-line diagnostics are warnings, so they survive either way).
/// Output format: `[  12.345s] LEVEL: message`, written to stderr so stdout
/// stays clean for the count report.
pub fn init_logger(verbose: bool) {
    START_TIME.set(Instant::now()).ok();

    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| {
            let elapsed = START_TIME.get().unwrap().elapsed();
            writeln!(
                buf,
                "[{:>8.3}s] {}: {}",
                elapsed.as_secs_f64(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}
