//! crates/logging/src/fallback.rs
//! Error stream of last resort for failures a backend cannot surface.
//!
//! Log calls never propagate failures to the application. Backends that lose
//! a line (closed pipe, full disk, unreachable daemon) and the dispatcher,
//! when a backend panics, hand the failure to this module instead. Reports go
//! to standard error; a failure to write standard error is ignored.

use std::any::Any;
use std::fmt;
use std::io::{self, Write};

use crate::call_site::CallSite;
use crate::severity::Severity;

/// Reports a failure that prevented `origin` from emitting a log line.
///
/// # Examples
///
/// ```
/// use std::io;
/// use logging::fallback;
///
/// let error = io::Error::from(io::ErrorKind::BrokenPipe);
/// fallback::report("console", &error);
/// ```
pub fn report(origin: &str, failure: &dyn fmt::Display) {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "cadmus::fallback", origin, %failure, "log line dropped");

    let _ = writeln!(
        io::stderr().lock(),
        "cadmus: {origin} dropped a log line: {failure}"
    );
}

/// Reports a panic raised by a backend while it handled a call.
pub(crate) fn report_panic(severity: Severity, site: &CallSite, payload: &(dyn Any + Send)) {
    let reason = panic_reason(payload);
    report(
        "dispatcher",
        &format_args!(
            "backend panicked on {severity} from {}:{}@{}: {reason}",
            site.file_name(),
            site.function(),
            site.line()
        ),
    );
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
