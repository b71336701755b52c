//! crates/logging/src/dispatcher.rs
//! Facade holding the active backend and forwarding calls to it.

use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::backend::{self, Backend};
use crate::call_site::CallSite;
use crate::console::ConsoleBackend;
use crate::fallback;
use crate::message::Message;
use crate::severity::Severity;

static SHARED: OnceLock<Dispatcher> = OnceLock::new();

/// Which kind of backend a [`Dispatcher`] currently forwards to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatcherState {
    /// The [`ConsoleBackend`] installed at construction.
    DefaultBackend,
    /// A backend installed by the application.
    CustomBackend,
}

struct Active {
    backend: Arc<dyn Backend>,
    state: DispatcherState,
}

/// Forwards log calls to exactly one active [`Backend`].
///
/// The process-wide instance returned by [`shared`] is what the `log_*!`
/// macros use. Dispatchers can also be constructed directly, which keeps
/// tests independent of global state.
///
/// Replacing the backend discards the previous one; there is no stack and no
/// way to restore it. Calls that already picked up the old backend finish on
/// it, every call that starts after [`set_backend`](Self::set_backend)
/// returns goes to the new one.
///
/// # Examples
///
/// ```
/// use logging::{CaptureBackend, Dispatcher, DispatcherState, call_site};
///
/// let dispatcher = Dispatcher::new();
/// assert_eq!(dispatcher.state(), DispatcherState::DefaultBackend);
///
/// let capture = CaptureBackend::new();
/// dispatcher.set_backend(capture.clone());
/// assert_eq!(dispatcher.state(), DispatcherState::CustomBackend);
///
/// dispatcher.warning(format_args!("{} retries left", 2), &call_site!());
/// assert_eq!(capture.drain()[0].message, "2 retries left");
/// ```
pub struct Dispatcher {
    active: RwLock<Active>,
}

impl Dispatcher {
    /// Creates a dispatcher forwarding to the [`ConsoleBackend`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Arc::new(ConsoleBackend), DispatcherState::DefaultBackend)
    }

    /// Creates a dispatcher forwarding to `backend`.
    #[must_use]
    pub fn with_backend<B>(backend: B) -> Self
    where
        B: Backend + 'static,
    {
        Self::from_parts(Arc::new(backend), DispatcherState::CustomBackend)
    }

    fn from_parts(backend: Arc<dyn Backend>, state: DispatcherState) -> Self {
        Self {
            active: RwLock::new(Active { backend, state }),
        }
    }

    /// Replaces the active backend.
    pub fn set_backend<B>(&self, backend: B)
    where
        B: Backend + 'static,
    {
        self.set_shared_backend(Arc::new(backend));
    }

    /// Replaces the active backend with one that is shared elsewhere.
    pub fn set_shared_backend(&self, backend: Arc<dyn Backend>) {
        let previous = {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            active.state = DispatcherState::CustomBackend;
            std::mem::replace(&mut active.backend, backend)
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "cadmus::dispatcher", "log backend replaced");
        drop(previous);
    }

    /// Returns a handle to the active backend.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner).backend)
    }

    /// Reports whether the default or an application backend is active.
    #[must_use]
    pub fn state(&self) -> DispatcherState {
        self.active.read().unwrap_or_else(PoisonError::into_inner).state
    }

    /// Forwards one call to the active backend.
    ///
    /// The message is turned into text first, whatever its variant, and
    /// routed to the per-severity operation matching `severity`. Error values
    /// therefore produce exactly the output of their description logged as
    /// text; the backend's [`report_warning`](Backend::report_warning) and
    /// [`report_error`](Backend::report_error) overloads are never called here.
    ///
    /// The backend is invoked after the internal lock has been released. A
    /// panic inside the backend is caught and reported through
    /// [`fallback`], so the caller always returns normally.
    pub fn dispatch(&self, severity: Severity, message: Message<'_>, site: &CallSite) {
        let backend = self.backend();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            message.with_text(|text| backend::route(&*backend, severity, text, site));
        }));
        if let Err(payload) = outcome {
            fallback::report_panic(severity, site, payload.as_ref());
        }
    }

    /// Forwards a verbose message.
    pub fn verbose<'a>(&self, message: impl Into<Message<'a>>, site: &CallSite) {
        self.dispatch(Severity::Verbose, message.into(), site);
    }

    /// Forwards an informational message.
    pub fn info<'a>(&self, message: impl Into<Message<'a>>, site: &CallSite) {
        self.dispatch(Severity::Info, message.into(), site);
    }

    /// Forwards a warning.
    pub fn warning<'a>(&self, message: impl Into<Message<'a>>, site: &CallSite) {
        self.dispatch(Severity::Warning, message.into(), site);
    }

    /// Forwards an error message.
    pub fn error<'a>(&self, message: impl Into<Message<'a>>, site: &CallSite) {
        self.dispatch(Severity::Error, message.into(), site);
    }

    /// Forwards a debug message.
    pub fn debug<'a>(&self, message: impl Into<Message<'a>>, site: &CallSite) {
        self.dispatch(Severity::Debug, message.into(), site);
    }

    /// Forwards the description of an error value as a warning.
    pub fn report_warning(&self, error: &dyn Error, site: &CallSite) {
        self.dispatch(Severity::Warning, Message::Error(error), site);
    }

    /// Forwards the description of an error value as an error.
    pub fn report_error(&self, error: &dyn Error, site: &CallSite) {
        self.dispatch(Severity::Error, Message::Error(error), site);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Returns the process-wide dispatcher, creating it on first use.
///
/// The shared dispatcher starts with the [`ConsoleBackend`] and lives until
/// the process exits.
pub fn shared() -> &'static Dispatcher {
    SHARED.get_or_init(Dispatcher::new)
}

/// Replaces the backend of the [`shared`] dispatcher.
///
/// # Examples
///
/// ```
/// use logging::{CaptureBackend, log_info, set_backend};
///
/// let capture = CaptureBackend::new();
/// set_backend(capture.clone());
///
/// log_info!("routed to the capture backend");
/// assert_eq!(capture.len(), 1);
/// ```
pub fn set_backend<B>(backend: B)
where
    B: Backend + 'static,
{
    shared().set_backend(backend);
}
