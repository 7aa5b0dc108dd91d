//! # Tap Logger
//!
//! A small logging facility that writes flag-gated records to the console
//! while mirroring every emitted record into an in-memory buffer a consumer
//! can drain on demand.
//!
//! ## Key Features
//!
//! * Two-level emission (DEBUG/INFO) gated by build mode and a `debug-log`
//!   startup flag, reproducing the debug/release filtering asymmetry exactly
//! * Automatic callsite capture (`func:line`) through the logging macros
//! * Bounded, drop-oldest record buffer with a destructive drain operation
//! * Side-effect-free command-line parsing into an immutable options value
//! * A `log`-facade bridge so existing `log::info!` call sites feed the tap
//!
//! ## Main Components
//!
//! * `Logger`: the emission path; filters, formats, writes, and enqueues
//! * `RecordBuffer`: the shared FIFO of formatted lines and its drain
//! * `StartupOptions` / `parse_args`: the configuration surface
//! * `LogBridge`: adapter implementing `log::Log`
//!
//! ## Quick Start
//!
//! ```
//! use tap_logger::{ilog, parse_args, Logger, ParseOutcome};
//!
//! let (options, outcome) = parse_args(["--debug-log"]);
//! assert_eq!(outcome, ParseOutcome::Ok);
//!
//! let logger = Logger::new(options);
//! ilog!(logger, "NET", "connected to {}", "example.org");
//!
//! // A log viewer drains the tap whenever it likes.
//! let history = logger.buffer().drain_all();
//! assert!(history.contains("[NET]: connected to example.org"));
//! ```

pub mod log_bridge;
pub mod record_buffer;
pub mod startup_options;
pub mod tap_logger;

pub use log_bridge::LogBridge;
pub use record_buffer::{RecordBuffer, DEFAULT_CAPACITY};
pub use startup_options::{help_text, parse_args, version_text, ParseOutcome, StartupOptions};
pub use tap_logger::{BuildMode, ConsoleSink, Level, Logger, StdoutSink, LINE_TERMINATOR};
