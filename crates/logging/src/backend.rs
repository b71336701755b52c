//! crates/logging/src/backend.rs
//! The contract every logging destination implements.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::call_site::CallSite;
use crate::severity::Severity;

/// A logging destination.
///
/// Backends receive already-normalized text together with the caller's
/// [`CallSite`]. Implementations only need [`log`](Self::log); the
/// per-severity operations forward to it by default and may be overridden
/// individually.
///
/// # Contract
///
/// - Operations return nothing and must not surface failures to the caller.
///   A backend that cannot reach its destination absorbs the failure, usually
///   by handing it to [`fallback::report`](crate::fallback::report).
/// - Operations are synchronous: they return once the line has been handed
///   to the destination medium, not necessarily after it is durable.
/// - Backends are shared across threads, hence the `Send + Sync` bound.
///
/// # Examples
///
/// ```
/// use logging::{Backend, CallSite, Severity};
///
/// struct Stderr;
///
/// impl Backend for Stderr {
///     fn log(&self, severity: Severity, message: &str, site: &CallSite) {
///         eprintln!("{severity} {}:{} {message}", site.file_name(), site.line());
///     }
/// }
///
/// let site = CallSite::new("src/main.rs", "main", 3);
/// Stderr.warning("disk almost full", &site);
/// ```
pub trait Backend: Send + Sync {
    /// Emits `message` at `severity`.
    fn log(&self, severity: Severity, message: &str, site: &CallSite);

    /// Emits a verbose message.
    fn verbose(&self, message: &str, site: &CallSite) {
        self.log(Severity::Verbose, message, site);
    }

    /// Emits an informational message.
    fn info(&self, message: &str, site: &CallSite) {
        self.log(Severity::Info, message, site);
    }

    /// Emits a warning.
    fn warning(&self, message: &str, site: &CallSite) {
        self.log(Severity::Warning, message, site);
    }

    /// Emits an error message.
    fn error(&self, message: &str, site: &CallSite) {
        self.log(Severity::Error, message, site);
    }

    /// Emits a debug message.
    fn debug(&self, message: &str, site: &CallSite) {
        self.log(Severity::Debug, message, site);
    }

    /// Emits an error value as a warning.
    ///
    /// The default renders the error's [`Display`](fmt::Display) output and
    /// forwards it to [`warning`](Self::warning).
    fn report_warning(&self, error: &dyn Error, site: &CallSite) {
        self.warning(&error.to_string(), site);
    }

    /// Emits an error value as an error.
    ///
    /// The default renders the error's [`Display`](fmt::Display) output and
    /// forwards it to [`error`](Self::error).
    fn report_error(&self, error: &dyn Error, site: &CallSite) {
        self.error(&error.to_string(), site);
    }
}

/// Routes text to the per-severity operation matching `severity`.
pub(crate) fn route(backend: &dyn Backend, severity: Severity, message: &str, site: &CallSite) {
    match severity {
        Severity::Verbose => backend.verbose(message, site),
        Severity::Info => backend.info(message, site),
        Severity::Warning => backend.warning(message, site),
        Severity::Error => backend.error(message, site),
        Severity::Debug => backend.debug(message, site),
    }
}

macro_rules! forward_backend {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl<B> Backend for $wrapper
            where
                B: Backend + ?Sized,
            {
                fn log(&self, severity: Severity, message: &str, site: &CallSite) {
                    (**self).log(severity, message, site);
                }

                fn verbose(&self, message: &str, site: &CallSite) {
                    (**self).verbose(message, site);
                }

                fn info(&self, message: &str, site: &CallSite) {
                    (**self).info(message, site);
                }

                fn warning(&self, message: &str, site: &CallSite) {
                    (**self).warning(message, site);
                }

                fn error(&self, message: &str, site: &CallSite) {
                    (**self).error(message, site);
                }

                fn debug(&self, message: &str, site: &CallSite) {
                    (**self).debug(message, site);
                }

                fn report_warning(&self, error: &dyn Error, site: &CallSite) {
                    (**self).report_warning(error, site);
                }

                fn report_error(&self, error: &dyn Error, site: &CallSite) {
                    (**self).report_error(error, site);
                }
            }
        )+
    };
}

forward_backend!(Arc<B>, Box<B>, &B);

/// Backend built from a closure.
///
/// Created by [`backend_fn`].
#[derive(Clone)]
pub struct FnBackend<F> {
    emit: F,
}

impl<F> fmt::Debug for FnBackend<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBackend").finish_non_exhaustive()
    }
}

impl<F> Backend for FnBackend<F>
where
    F: Fn(Severity, &str, &CallSite) + Send + Sync,
{
    fn log(&self, severity: Severity, message: &str, site: &CallSite) {
        (self.emit)(severity, message, site);
    }
}

/// Wraps a closure as a [`Backend`].
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logging::{Backend, CallSite, backend_fn};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let backend = backend_fn(move |severity, message, _site| {
///     sink.lock().unwrap().push(format!("{severity}: {message}"));
/// });
///
/// backend.info("ready", &CallSite::new("main.rs", "main", 1));
/// assert_eq!(seen.lock().unwrap().as_slice(), ["info: ready"]);
/// ```
pub fn backend_fn<F>(emit: F) -> FnBackend<F>
where
    F: Fn(Severity, &str, &CallSite) + Send + Sync,
{
    FnBackend { emit }
}
