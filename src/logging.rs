//! Stderr logger for the command-line front end.
//!
//! Every record carries a process-wide sequence number so interleaved output
//! from the engine and the document layer can be ordered afterwards.

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global sequence counter for log records
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

static LOGGER: StderrLogger = StderrLogger;

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:05}] {:<5} {}: {}",
            next_seq(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Level for `-v` flags, falling back to the configured level.
pub fn level_for(verbosity: u8, configured: LevelFilter) -> LevelFilter {
    match verbosity {
        0 => configured,
        1 => configured.max(LevelFilter::Info),
        2 => configured.max(LevelFilter::Debug),
        _ => LevelFilter::Trace,
    }
}
