//! crates/logging-sink/src/tracing_backend.rs
//! Backend re-emitting log calls as `tracing` events.
//!
//! Applications that already install a `tracing` subscriber can route the
//! facade into it instead of writing lines directly. Each call becomes one
//! event with target `cadmus` whose message is the logged text and whose
//! `file`, `function`, and `line` fields carry the call site.

use logging::{Backend, CallSite, Severity};
use tracing::Level;

/// Event target used for every re-emitted call.
pub const TRACING_TARGET: &str = "cadmus";

/// Backend forwarding each call to the current `tracing` dispatcher.
///
/// # Examples
///
/// ```
/// use logging_sink::TracingBackend;
///
/// logging::set_backend(TracingBackend::new());
/// logging::log_warning!("cache miss for {}", "user:42");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TracingBackend;

impl TracingBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the `tracing` level [`log`](Backend::log) emits `severity` at.
    #[must_use]
    pub const fn level(severity: Severity) -> Level {
        match severity {
            Severity::Verbose => Level::TRACE,
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error => Level::ERROR,
        }
    }
}

// `tracing` macros need the level and target as constants.
macro_rules! emit {
    ($level:expr, $message:expr, $site:expr) => {
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            file = $site.file(),
            function = $site.function(),
            line = $site.line(),
            "{}",
            $message
        )
    };
}

impl Backend for TracingBackend {
    fn log(&self, severity: Severity, message: &str, site: &CallSite) {
        // Same mapping as `Self::level`, spelled out because event levels
        // must be constants.
        match severity {
            Severity::Verbose => emit!(Level::TRACE, message, site),
            Severity::Debug => emit!(Level::DEBUG, message, site),
            Severity::Info => emit!(Level::INFO, message, site),
            Severity::Warning => emit!(Level::WARN, message, site),
            Severity::Error => emit!(Level::ERROR, message, site),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_severity() {
        assert_eq!(TracingBackend::level(Severity::Verbose), Level::TRACE);
        assert_eq!(TracingBackend::level(Severity::Debug), Level::DEBUG);
        assert_eq!(TracingBackend::level(Severity::Info), Level::INFO);
        assert_eq!(TracingBackend::level(Severity::Warning), Level::WARN);
        assert_eq!(TracingBackend::level(Severity::Error), Level::ERROR);
    }

    #[test]
    fn emitting_without_subscriber_is_silent() {
        let site = CallSite::new("src/lib.rs", "tests", 1);
        for severity in Severity::ALL {
            TracingBackend.log(severity, "nobody listens", &site);
        }
    }
}
