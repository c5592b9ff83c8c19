use crate::{ByteSink, SinkWriter};
use core::fmt::Write;
use kernel_sync::SyncOnceCell;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct TraceLogger<S> {
    sink: S,
    max_level: LevelFilter,
}

impl<S: ByteSink> TraceLogger<S> {
    #[must_use]
    pub const fn new(sink: S, max_level: LevelFilter) -> Self {
        Self { sink, max_level }
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ByteSink + Send + Sync + 'static> TraceLogger<S> {
    /// Moves the logger into `slot` and registers it with `log`.
    ///
    /// Call this once during early init, before IRQs are unmasked.
    ///
    /// # Errors
    /// Fails if a logger was registered before.
    pub fn install(self, slot: &'static SyncOnceCell<Self>) -> Result<(), SetLoggerError> {
        slot.get_or_init(|| self).register()
    }

    /// Registers a logger that already lives in a `static` with `log`.
    ///
    /// # Errors
    /// Fails if a logger was registered before.
    pub fn register(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

impl<S: ByteSink + Send + Sync> Log for TraceLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Best effort; a sink cannot fail.
        let _ = writeln!(
            SinkWriter(&self.sink),
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
