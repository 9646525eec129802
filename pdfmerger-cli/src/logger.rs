//! Minimal stderr backend for the `log` facade.
//!
//! The library reports per-file progress through `log::info!` and
//! `log::debug!`; this logger prints those records to stderr so they never
//! mix with the JSON report on stdout.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes `pdfmerger` log records to stderr.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Pick the level matching the CLI verbosity flags.
    pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
        if quiet {
            LevelFilter::Error
        } else if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    /// Install as the global logger.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Dependencies (lopdf in particular) are noisy at debug level.
        metadata.level() <= self.level && metadata.target().starts_with("pdfmerger")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{}] {}",
                record.level().as_str().to_lowercase(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
