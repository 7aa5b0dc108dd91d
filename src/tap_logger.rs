use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::record_buffer::RecordBuffer;
use crate::startup_options::StartupOptions;

/// Core implementation of the tapped logging system.
///
/// This module provides the Logger struct and ConsoleSink trait for
/// emitting flag-gated log records to the console while mirroring every
/// emitted record into a drainable in-memory buffer.

/// Line terminator appended to every record enqueued into the buffer and
/// written after every console line.
#[cfg(windows)]
pub const LINE_TERMINATOR: &str = "\r\n";
/// Line terminator appended to every record enqueued into the buffer and
/// written after every console line.
#[cfg(not(windows))]
pub const LINE_TERMINATOR: &str = "\n";

/// Severity of a log record. This facility knows exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Verbose diagnostics; gated by build mode and the `debug-log` flag.
    Debug,
    /// Normal operational records; always emitted.
    Info,
}

/// Whether the logger behaves as a debug or a release build.
///
/// The deployed binary's build mode decides which DEBUG records survive and
/// which records carry a callsite prefix. It is modelled as a runtime value
/// seeded from the compiler rather than as conditional compilation, so both
/// regimes stay testable in a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// The mode matching how this crate was actually compiled.
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Debug
        } else {
            BuildMode::Release
        }
    }
}

/// Destination for emitted console lines.
///
/// Implementations receive each record that passes filtering, one line at a
/// time and without its terminator. The Logger owns no output policy beyond
/// "one line per record"; where the line goes is the sink's business, which
/// keeps the emission path testable without capturing stdout.
///
/// # Usage
///
/// ```
/// # use tap_logger::ConsoleSink;
/// # use std::sync::{Arc, Mutex};
/// // Sink that collects lines for inspection
/// struct CollectingSink(Arc<Mutex<Vec<String>>>);
///
/// impl ConsoleSink for CollectingSink {
///     fn write_line(&mut self, line: &str) {
///         self.0.lock().unwrap().push(line.to_string());
///     }
/// }
/// ```
pub trait ConsoleSink: Send {
    /// Write one emitted record. `line` carries no terminator; the sink
    /// appends whatever its medium requires.
    fn write_line(&mut self, line: &str);
}

/// The default sink: one line per record on standard output.
///
/// Write errors are swallowed. Logging must never fail the caller, and a
/// dead stdout should not blind the in-memory tap.
pub struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        let _ = lock.write_all(line.as_bytes());
        let _ = lock.write_all(LINE_TERMINATOR.as_bytes());
    }
}

/// A console logger with an in-memory tap.
///
/// Every record that passes filtering produces two effects in one call:
///
/// 1. The formatted line is written to the console sink
/// 2. The line plus terminator is enqueued into the shared [`RecordBuffer`]
///
/// A record is either fully emitted (both effects) or fully discarded.
///
/// # Filtering
///
/// The record shape is `[module]: message`, optionally prefixed with
/// `func:line ` naming the callsite. Which records survive and which carry
/// the prefix depends on the build mode and the `debug-log` startup flag:
///
/// * Debug build: every record is emitted. The callsite prefix appears on
///   DEBUG records, and on everything once `debug_log` is set.
/// * Release build: INFO records are always emitted and never prefixed.
///   DEBUG records are emitted only when `debug_log` is set, always with
///   the prefix; otherwise they are silently discarded.
///
/// # Thread Safety
///
/// `Logger` is `Send + Sync`: the startup options are immutable after
/// construction, the sink sits behind a mutex, and the buffer synchronizes
/// itself. Share one instance across threads with `Arc`.
///
/// # Examples
///
/// ```
/// use tap_logger::{Logger, StartupOptions, Level};
///
/// let logger = Logger::new(StartupOptions::default());
/// logger.emit(Level::Info, "NET", "connect", 43, "connected");
///
/// let history = logger.buffer().drain_all();
/// assert!(history.contains("[NET]: connected"));
/// ```
pub struct Logger {
    options: StartupOptions,
    mode: BuildMode,
    sink: Mutex<Box<dyn ConsoleSink>>,
    buffer: Arc<RecordBuffer>,
}

impl Logger {
    /// Creates a logger writing to stdout, in the compiled build mode, with
    /// a fresh buffer of default capacity.
    ///
    /// `options` must be fully parsed before the first emission; the logger
    /// reads them without synchronization on every call.
    pub fn new(options: StartupOptions) -> Self {
        Self::with_sink(options, BuildMode::current(), Box::new(StdoutSink))
    }

    /// Creates a logger with an explicit build mode and sink.
    ///
    /// This is how tests exercise both filtering regimes in one build and
    /// observe console output without capturing stdout.
    pub fn with_sink(options: StartupOptions, mode: BuildMode, sink: Box<dyn ConsoleSink>) -> Self {
        Self {
            options,
            mode,
            sink: Mutex::new(sink),
            buffer: Arc::new(RecordBuffer::new()),
        }
    }

    /// Handle to the shared record buffer.
    ///
    /// This is the consumer surface: whatever displays or persists log
    /// history clones the handle once and calls
    /// [`drain_all`](RecordBuffer::drain_all) on demand.
    pub fn buffer(&self) -> Arc<RecordBuffer> {
        Arc::clone(&self.buffer)
    }

    /// The build mode this logger filters under.
    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Whether a record at `level` would survive filtering.
    ///
    /// Only release-mode DEBUG records without the `debug-log` flag are
    /// discarded; everything else is emitted in some form.
    pub fn would_emit(&self, level: Level) -> bool {
        self.mode == BuildMode::Debug || level != Level::Debug || self.options.debug_log
    }

    /// Emits one record.
    ///
    /// Never fails and never panics on caller input: an empty module or
    /// message still produces a valid, if sparse, line. For automatic
    /// callsite capture use the [`dlog!`](crate::dlog) and
    /// [`ilog!`](crate::ilog) macros instead of calling this directly.
    ///
    /// # Arguments
    ///
    /// * `level` - Record severity
    /// * `module` - Free-form tag of the emitting subsystem
    /// * `callsite_func` - Function name of the call origin
    /// * `callsite_line` - Line number of the call origin
    /// * `message` - The record text
    pub fn emit(
        &self,
        level: Level,
        module: &str,
        callsite_func: &str,
        callsite_line: u32,
        message: &str,
    ) {
        let mut line = format!("[{module}]: {message}");

        match self.mode {
            BuildMode::Debug => {
                if level == Level::Debug || self.options.debug_log {
                    line = format!("{callsite_func}:{callsite_line} {line}");
                }
            }
            BuildMode::Release => {
                if level == Level::Debug {
                    if self.options.debug_log {
                        line = format!("{callsite_func}:{callsite_line} {line}");
                    } else {
                        // Discarded: neither the sink nor the buffer sees it.
                        return;
                    }
                }
            }
        }

        self.sink.lock().write_line(&line);
        self.buffer.enqueue(format!("{line}{LINE_TERMINATOR}"));
    }
}

/// Expands to the path of the enclosing function, without a trailing
/// turbofish segment.
///
/// Building block for [`dlog!`](crate::dlog) and [`ilog!`](crate::ilog);
/// rarely useful on its own.
#[macro_export]
macro_rules! callsite_func {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// Emits a DEBUG record with the callsite captured automatically.
///
/// # Arguments
///
/// * `logger` - The [`Logger`] to emit through
/// * `module` - The module tag
/// * `fmt, args...` - Message in `format!` syntax
///
/// # Examples
///
/// ```
/// # use tap_logger::{dlog, Logger, StartupOptions};
/// # let logger = Logger::new(StartupOptions::default());
/// dlog!(logger, "NET", "retrying in {}ms", 250);
/// ```
#[macro_export]
macro_rules! dlog {
    ($logger:expr, $module:expr, $($arg:tt)+) => {{
        $logger.emit(
            $crate::Level::Debug,
            $module,
            $crate::callsite_func!(),
            ::std::line!(),
            &::std::format!($($arg)+),
        );
    }};
}

/// Emits an INFO record with the callsite captured automatically.
///
/// # Examples
///
/// ```
/// # use tap_logger::{ilog, Logger, StartupOptions};
/// # let logger = Logger::new(StartupOptions::default());
/// ilog!(logger, "NET", "connected to {}", "example.org");
/// ```
#[macro_export]
macro_rules! ilog {
    ($logger:expr, $module:expr, $($arg:tt)+) => {{
        $logger.emit(
            $crate::Level::Info,
            $module,
            $crate::callsite_func!(),
            ::std::line!(),
            &::std::format!($($arg)+),
        );
    }};
}
