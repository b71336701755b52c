#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! src/lib.rs
//!
//! # Overview
//!
//! `cadmus` bundles the logging facade with its destinations. Application
//! code logs through `log_verbose!`, `log_info!`, `log_warning!`,
//! `log_error!`, and `log_debug!`; the process-wide dispatcher forwards each
//! call to one replaceable [`Backend`]. Out of the box that backend writes
//! `[<tag> <file>:<function>@<line>]: <message>` lines to standard output.
//!
//! # Design
//!
//! - The facade, severity model, call-site capture, console backend, and
//!   macros come from the `logging` crate and are re-exported here.
//! - Writer, file, syslog, and tracing destinations and the
//!   [`SinkConfig`] loader come from `logging-sink`, re-exported under
//!   [`sink`] with the most common items also at the root.
//!
//! # Examples
//!
//! ```
//! use cadmus::{CaptureBackend, Severity, log_info, log_warning, set_backend};
//!
//! let capture = CaptureBackend::new();
//! set_backend(capture.clone());
//!
//! let peers = 3;
//! log_info!("joined cluster with {peers} peers");
//! log_warning!(error = std::io::Error::other("peer 2 unreachable"));
//!
//! let records = capture.drain();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].severity, Severity::Warning);
//! assert_eq!(records[1].message, "peer 2 unreachable");
//! ```
//!
//! Select the destination from `CADMUS_LOG_*` variables at startup:
//!
//! ```no_run
//! cadmus::SinkConfig::from_env()?.install()?;
//! cadmus::log_info!("configured");
//! # Ok::<(), cadmus::SinkError>(())
//! ```

pub use logging::{
    Backend, CallSite, CaptureBackend, ConsoleBackend, Dispatcher, DispatcherState, FnBackend,
    Line, Message, ParseSeverityError, Record, RecordSource, Severity, backend_fn, call_site,
    fallback, function_name, log_debug, log_error, log_info, log_verbose, log_warning,
    set_backend, shared, short_file_name, write_line,
};
pub use logging_sink::{Destination, SinkConfig, SinkError};

/// Concrete destinations and their configuration.
pub mod sink {
    pub use logging_sink::*;
}
