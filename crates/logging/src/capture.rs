//! crates/logging/src/capture.rs
//! In-memory backend that records every call it receives.

use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::Backend;
use crate::call_site::CallSite;
use crate::severity::Severity;

/// How a recorded message reached the backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordSource {
    /// Through a per-severity text operation.
    Text,
    /// Through a direct call of [`Backend::report_warning`] or
    /// [`Backend::report_error`]. The dispatcher never produces these.
    Error,
}

/// A single call observed by a [`CaptureBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Severity of the call.
    pub severity: Severity,
    /// Text handed to the backend.
    pub message: String,
    /// Call site supplied by the caller.
    pub site: CallSite,
    /// Operation that delivered the message.
    pub source: RecordSource,
}

/// Backend that keeps every call in memory.
///
/// Clones share the same buffer, so a test can install one clone in a
/// [`Dispatcher`](crate::Dispatcher) and inspect the records through another.
///
/// # Examples
///
/// ```
/// use logging::{CaptureBackend, Dispatcher, Severity, call_site};
///
/// let capture = CaptureBackend::new();
/// let dispatcher = Dispatcher::with_backend(capture.clone());
///
/// dispatcher.info("hello", &call_site!());
///
/// let records = capture.drain();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].severity, Severity::Info);
/// assert_eq!(records[0].message, "hello");
/// assert!(capture.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaptureBackend {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CaptureBackend {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record captured so far.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Removes and returns every captured record.
    pub fn drain(&self) -> Vec<Record> {
        self.lock().drain(..).collect()
    }

    /// Number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, severity: Severity, message: String, site: &CallSite, source: RecordSource) {
        self.lock().push(Record {
            severity,
            message,
            site: *site,
            source,
        });
    }
}

impl Backend for CaptureBackend {
    fn log(&self, severity: Severity, message: &str, site: &CallSite) {
        self.push(severity, message.to_owned(), site, RecordSource::Text);
    }

    fn report_warning(&self, error: &dyn Error, site: &CallSite) {
        self.push(Severity::Warning, error.to_string(), site, RecordSource::Error);
    }

    fn report_error(&self, error: &dyn Error, site: &CallSite) {
        self.push(Severity::Error, error.to_string(), site, RecordSource::Error);
    }
}
