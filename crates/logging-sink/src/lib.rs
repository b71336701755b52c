#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides concrete destinations for the `logging` facade.
//! Each destination implements [`logging::Backend`] and can be installed in
//! the shared dispatcher directly or through a [`SinkConfig`].
//!
//! # Design
//!
//! - [`WriterBackend`] renders calls into any [`std::io::Write`] target using
//!   the console line layout, optionally prefixed by a [`TimestampFormat`]
//!   and terminated according to a [`LineMode`]. [`open_file`] wraps it
//!   around a log file.
//! - [`syslog::SyslogBackend`] (unix) forwards calls to syslog(3).
//! - `TracingBackend` (feature `tracing`) re-emits calls as `tracing`
//!   events.
//! - [`SinkConfig`] selects one of these from code, serialized settings, or
//!   `CADMUS_LOG_*` environment variables and installs it.
//!
//! # Invariants
//!
//! - One log call produces at most one write to the destination, performed
//!   while holding the destination's lock, so lines never interleave.
//! - Emission failures are absorbed and reported through
//!   [`logging::fallback`]; they never reach the code that logged.
//!
//! # Errors
//!
//! [`SinkError`] covers configuration and opening failures: unknown
//! destination, facility, or timestamp names, invalid flags, and files that
//! cannot be opened.
//!
//! # Examples
//!
//! Send the shared dispatcher's output to a file with timestamps:
//!
//! ```
//! use logging_sink::{Destination, SinkConfig, TimestampFormat};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("service.log");
//!
//! let mut config = SinkConfig::new(Destination::File(path.clone()));
//! config.timestamps = Some(TimestampFormat::Rfc3339);
//! config.install()?;
//!
//! logging::log_info!("service started");
//!
//! let contents = std::fs::read_to_string(&path)?;
//! assert!(contents.ends_with("]: service started\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # See also
//!
//! - `logging` for the facade, the console backend, and the `log_*!` macros.

mod config;
mod error;
mod line_mode;
mod sink;
#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;
mod timestamp;
#[cfg(feature = "tracing")]
mod tracing_backend;

pub use config::{APPEND_VAR, DESTINATION_VAR, Destination, SinkConfig, TIMESTAMPS_VAR};
pub use error::SinkError;
pub use line_mode::LineMode;
pub use sink::{FileBackend, WriterBackend, open_file};
pub use timestamp::TimestampFormat;
#[cfg(feature = "tracing")]
pub use tracing_backend::{TRACING_TARGET, TracingBackend};
