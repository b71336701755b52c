//! crates/logging/src/macros.rs
//! Free-function API: one macro per severity.
//!
//! Every macro captures its [`CallSite`](crate::CallSite) where it is invoked
//! and forwards exactly one call to the [`shared`](crate::shared) dispatcher.
//! The accepted forms are:
//!
//! - `log_info!("format {}", args)`: text, formatted like `format!`;
//! - `log_info!(value)`: any [`Display`](std::fmt::Display) value;
//! - `log_error!(error = err)`: an error value, accepted by `log_warning!`
//!   and `log_error!` only;
//! - a leading `at = <SystemTime>,` replaces the capture timestamp.
//!
//! A literal in first position is always the format string. Other literals
//! (`42`, `true`) are rejected with a diagnostic pointing at the variable or
//! `"{}"` forms.

/// Implemented by the only literal type accepted as a format string.
#[doc(hidden)]
#[diagnostic::on_unimplemented(
    message = "`{Self}` literal cannot be used as a log message",
    label = "only string literals are format strings",
    note = "bind the value first (`let n = 42; log_info!(n)`) or format it (`log_info!(\"{{}}\", 42)`)"
)]
pub trait FormatLiteral {}

impl FormatLiteral for &'static str {}

/// Rejects non-string literals in the format position.
#[doc(hidden)]
#[inline]
pub const fn format_literal<T: FormatLiteral>(_literal: &T) {}

#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch {
    (@site $site:expr; $severity:expr; @error $error:expr) => {
        $crate::shared().dispatch($severity, $crate::Message::from_error(&$error), &$site)
    };
    (@site $site:expr; $severity:expr; $fmt:literal $(, $arg:expr)* $(,)?) => {{
        $crate::__private::format_literal(&$fmt);
        $crate::shared().dispatch(
            $severity,
            $crate::Message::from(::core::format_args!($fmt $(, $arg)*)),
            &$site,
        )
    }};
    (@site $site:expr; $severity:expr; $value:expr $(,)?) => {
        $crate::shared().dispatch($severity, $crate::Message::describe(&$value), &$site)
    };
    (@fallible $severity:expr; at = $timestamp:expr, error = $error:expr $(,)?) => {
        $crate::__dispatch!(@site $crate::call_site!(at = $timestamp); $severity; @error $error)
    };
    (@fallible $severity:expr; error = $error:expr $(,)?) => {
        $crate::__dispatch!(@site $crate::call_site!(); $severity; @error $error)
    };
    (@fallible $severity:expr; $($message:tt)+) => {
        $crate::__dispatch!($severity; $($message)+)
    };
    ($severity:expr; at = $timestamp:expr, $($message:tt)+) => {
        $crate::__dispatch!(@site $crate::call_site!(at = $timestamp); $severity; $($message)+)
    };
    ($severity:expr; $($message:tt)+) => {
        $crate::__dispatch!(@site $crate::call_site!(); $severity; $($message)+)
    };
}

/// Logs a verbose message through the shared dispatcher.
///
/// # Examples
///
/// ```
/// use logging::log_verbose;
///
/// let entries = 12;
/// log_verbose!("scanned {entries} entries");
/// ```
#[macro_export]
macro_rules! log_verbose {
    ($($message:tt)+) => {
        $crate::__dispatch!($crate::Severity::Verbose; $($message)+)
    };
}

/// Logs an informational message through the shared dispatcher.
///
/// # Examples
///
/// ```
/// use logging::log_info;
///
/// log_info!("listening on port {}", 8080);
///
/// let address = std::net::Ipv4Addr::LOCALHOST;
/// log_info!(address);
/// ```
///
/// Only string literals are format strings; a bare number is rejected at
/// compile time:
///
/// ```compile_fail
/// use logging::log_info;
///
/// log_info!(42);
/// ```
#[macro_export]
macro_rules! log_info {
    ($($message:tt)+) => {
        $crate::__dispatch!($crate::Severity::Info; $($message)+)
    };
}

/// Logs a warning through the shared dispatcher.
///
/// Besides text and describable values, accepts an error value with
/// `error = <expr>`.
///
/// # Examples
///
/// ```
/// use logging::log_warning;
///
/// let error = std::io::Error::other("cache miss");
/// log_warning!(error = error);
/// log_warning!("retrying in {}s", 5);
/// ```
#[macro_export]
macro_rules! log_warning {
    ($($message:tt)+) => {
        $crate::__dispatch!(@fallible $crate::Severity::Warning; $($message)+)
    };
}

/// Logs an error through the shared dispatcher.
///
/// Besides text and describable values, accepts an error value with
/// `error = <expr>`.
///
/// # Examples
///
/// ```
/// use std::time::SystemTime;
/// use logging::log_error;
///
/// let error = std::io::Error::other("connection reset");
/// log_error!(error = error);
/// log_error!(at = SystemTime::now(), "giving up after {} attempts", 3);
/// ```
#[macro_export]
macro_rules! log_error {
    ($($message:tt)+) => {
        $crate::__dispatch!(@fallible $crate::Severity::Error; $($message)+)
    };
}

/// Logs a debug message through the shared dispatcher.
///
/// # Examples
///
/// ```
/// use logging::log_debug;
///
/// let state = vec![1, 2, 3];
/// log_debug!("state = {state:?}");
/// ```
#[macro_export]
macro_rules! log_debug {
    ($($message:tt)+) => {
        $crate::__dispatch!($crate::Severity::Debug; $($message)+)
    };
}
