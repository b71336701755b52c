#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a small logging facade. Application code logs through the
//! `log_*!` macros; a process-wide [`Dispatcher`] forwards each call to the
//! one active [`Backend`], which formats and emits it. The destination can
//! be swapped at runtime without touching call sites.
//!
//! # Design
//!
//! - [`Severity`] labels a call as verbose, info, warning, error, or debug.
//!   Severities route; they never filter.
//! - [`CallSite`] records the file, enclosing function, line, and capture
//!   time of the call. The macros build it where they are invoked, so it
//!   names the application's code rather than the facade.
//! - [`Message`] is the payload sum type: text, format arguments, a
//!   describable value, or an error value. It becomes text exactly once.
//! - [`Backend`] is the destination contract; [`ConsoleBackend`] writes
//!   `[<tag> <file>:<function>@<line>]: <message>` lines to standard output.
//! - [`Dispatcher`] holds the active backend. [`shared`] returns the
//!   process-wide instance, created lazily with the console backend, and
//!   [`set_backend`] replaces its backend.
//!
//! # Invariants
//!
//! - Every log call results in exactly one backend invocation. Nothing is
//!   buffered, batched, deduplicated, or filtered.
//! - After a backend replacement returns, no call reaches the previous
//!   backend.
//! - A log call never fails: backends absorb their own write errors and the
//!   dispatcher catches backend panics, both reporting through [`fallback`].
//!
//! # Errors
//!
//! Logging itself has no error type. [`ParseSeverityError`] is returned when
//! parsing a severity name fails.
//!
//! # Examples
//!
//! Route the shared dispatcher into memory and inspect what was logged:
//!
//! ```
//! use logging::{CaptureBackend, RecordSource, Severity, log_error, log_info, set_backend};
//!
//! let capture = CaptureBackend::new();
//! set_backend(capture.clone());
//!
//! log_info!("synced {} files", 3);
//! log_error!(error = std::io::Error::other("boom"));
//!
//! let records = capture.drain();
//! assert_eq!(records[0].message, "synced 3 files");
//! assert_eq!(records[1].severity, Severity::Error);
//! assert_eq!(records[1].message, "boom");
//! assert_eq!(records[1].source, RecordSource::Text);
//! assert_eq!(records[1].site.file(), file!());
//! ```
//!
//! # See also
//!
//! - `logging-sink` for writer, file, syslog, and tracing backends and for
//!   destination configuration.

mod backend;
mod call_site;
mod capture;
mod console;
mod dispatcher;
pub mod fallback;
mod format;
mod macros;
mod message;
mod severity;

pub use backend::{Backend, FnBackend, backend_fn};
pub use call_site::CallSite;
pub use capture::{CaptureBackend, Record, RecordSource};
pub use console::ConsoleBackend;
pub use dispatcher::{Dispatcher, DispatcherState, set_backend, shared};
pub use format::{Line, short_file_name, write_line};
pub use message::Message;
pub use severity::{ParseSeverityError, Severity};

#[doc(hidden)]
pub mod __private {
    pub use crate::call_site::enclosing_function;
    pub use crate::macros::{FormatLiteral, format_literal};
}
