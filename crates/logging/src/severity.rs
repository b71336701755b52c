//! crates/logging/src/severity.rs
//! Severity labels routed through the facade.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Classification of a log message.
///
/// Severities are routing labels only. They carry no ordering and the facade
/// never filters on them: every call is emitted regardless of its severity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Severity {
    /// Chatty progress output.
    Verbose,
    /// General information.
    Info,
    /// Something unexpected that the application recovered from.
    Warning,
    /// A failure.
    Error,
    /// Developer diagnostics.
    Debug,
}

impl Severity {
    /// Every severity in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Verbose,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Debug,
    ];

    /// Returns the presentation tag used by the console backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::Info.tag(), "💡");
    /// assert_eq!(Severity::Error.tag(), "🔥");
    /// ```
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Verbose => "📢",
            Self::Info => "💡",
            Self::Warning => "☢",
            Self::Error => "🔥",
            Self::Debug => "🐞",
        }
    }

    /// Returns the lowercase name of the severity.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }

    /// Reports whether the severity has an error-value overload.
    ///
    /// Only warnings and errors accept native error values. The dispatcher
    /// logs their description as text.
    #[must_use]
    pub const fn accepts_error(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a [`Severity`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown severity {0:?}; expected verbose, info, warning, error, or debug")]
pub struct ParseSeverityError(String);

impl ParseSeverityError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeverityError(s.to_owned()))
    }
}
