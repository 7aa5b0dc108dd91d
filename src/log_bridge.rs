use std::sync::Arc;

use log::{Log, Metadata, Record};

use crate::tap_logger::{Level, Logger};

/// Adapter feeding the `log` facade into a [`Logger`].
///
/// Code written against `log::info!`/`log::debug!` gets the same filtering
/// and the same in-memory tap as code using this crate's macros: the `log`
/// target becomes the module tag, and the record's file/line metadata
/// stands in for the callsite.
///
/// `Trace` and `Debug` map to [`Level::Debug`]; everything else is
/// [`Level::Info`].
pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Registers the bridge as the process-wide `log` logger.
    ///
    /// Fails if another logger was installed first; `log` allows exactly
    /// one per process.
    pub fn install(
        logger: Arc<Logger>,
        max_level: log::LevelFilter,
    ) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(logger)))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Trace | log::Level::Debug => Level::Debug,
        log::Level::Info | log::Level::Warn | log::Level::Error => Level::Info,
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Mirrors the release-mode discard rule so callers pay the
        // formatting cost only for records that will survive.
        self.logger.would_emit(map_level(metadata.level()))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.logger.emit(
            map_level(record.level()),
            record.target(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            &record.args().to_string(),
        );
    }

    fn flush(&self) {}
}
