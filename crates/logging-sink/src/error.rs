//! crates/logging-sink/src/error.rs
//! Errors raised while building a destination.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or opening a log destination.
///
/// Emission never produces these: once a backend is built, failures to write
/// a line are absorbed and reported through [`logging::fallback`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log file could not be opened.
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenFile {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The destination string names no known destination.
    #[error("unknown log destination '{0}'")]
    UnknownDestination(String),
    /// The syslog facility name is not recognised.
    #[error("unknown syslog facility '{0}'")]
    UnknownFacility(String),
    /// The timestamp format name is not recognised.
    #[error("unknown timestamp format '{0}'")]
    UnknownTimestampFormat(String),
    /// A boolean setting holds something other than a boolean.
    #[error("invalid value '{value}' for {key}: expected true or false")]
    InvalidFlag {
        /// Name of the setting.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
}
