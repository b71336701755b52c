//! crates/logging/src/call_site.rs
//! Metadata describing where application code issued a log call.

use std::time::SystemTime;

use crate::format::short_file_name;

/// Name of the marker function planted by [`function_name!`](crate::function_name).
const MARKER: &str = "__cadmus_call_site";

/// Location of a log call in application code.
///
/// A call site is built once per logging call, at the call boundary, from the
/// caller's lexical context. The macros in this crate capture it through
/// [`call_site!`](crate::call_site), which evaluates `file!()`, `line!()`, and
/// the enclosing function name where the application logged rather than where
/// the facade forwards the call.
///
/// The optional timestamp is carried for backends that render it; the console
/// backend accepts it but leaves it out of its format.
///
/// # Examples
///
/// ```
/// use logging::CallSite;
///
/// let site = CallSite::new("/x/y/Z.swift", "run()", 42);
/// assert_eq!(site.file_name(), "Z.swift");
/// assert_eq!(site.line(), 42);
/// assert!(site.timestamp().is_none());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    function: &'static str,
    line: u32,
    timestamp: Option<SystemTime>,
}

impl CallSite {
    /// Creates a call site without a capture timestamp.
    #[must_use]
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
            timestamp: None,
        }
    }

    /// Creates a call site stamped with the current system time.
    #[must_use]
    pub fn captured(file: &'static str, function: &'static str, line: u32) -> Self {
        Self::new(file, function, line).with_timestamp(SystemTime::now())
    }

    /// Returns the call site with an explicit capture timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Full source path as reported by `file!()`.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Final component of [`file`](Self::file).
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        short_file_name(self.file)
    }

    /// Name of the function that issued the call.
    #[must_use]
    pub const fn function(&self) -> &'static str {
        self.function
    }

    /// Line number of the call.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Time at which the call site was captured, when recorded.
    #[must_use]
    pub const fn timestamp(&self) -> Option<SystemTime> {
        self.timestamp
    }
}

/// Reduces the type name of the marker function to its enclosing function.
///
/// `type_name` yields paths such as `app::worker::run::__cadmus_call_site` or
/// `app::main::{{closure}}::__cadmus_call_site`; the result is the last path
/// segment that is neither the marker nor a closure.
#[doc(hidden)]
#[must_use]
pub fn enclosing_function(marker_path: &'static str) -> &'static str {
    marker_path
        .rsplit("::")
        .find(|segment| *segment != MARKER && *segment != "{{closure}}")
        .unwrap_or(marker_path)
}

/// Expands to the name of the function enclosing the invocation.
///
/// # Examples
///
/// ```
/// fn handle_request() -> &'static str {
///     logging::function_name!()
/// }
///
/// assert_eq!(handle_request(), "handle_request");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __cadmus_call_site() {}
        $crate::__private::enclosing_function(::core::any::type_name_of_val(&__cadmus_call_site))
    }};
}

/// Captures a [`CallSite`] for the location of the invocation.
///
/// The site is stamped with the current time unless an explicit timestamp is
/// supplied with `at = <SystemTime>`.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// fn load() -> logging::CallSite {
///     logging::call_site!()
/// }
///
/// let site = load();
/// assert_eq!(site.function(), "load");
/// assert!(site.timestamp().is_some());
///
/// let epoch = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
/// let site = logging::call_site!(at = epoch);
/// assert_eq!(site.timestamp(), Some(epoch));
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::captured(::core::file!(), $crate::function_name!(), ::core::line!())
    };
    (at = $timestamp:expr) => {
        $crate::CallSite::new(::core::file!(), $crate::function_name!(), ::core::line!())
            .with_timestamp($timestamp)
    };
}
