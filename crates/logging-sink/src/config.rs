//! crates/logging-sink/src/config.rs
//! Destination selection for the shared dispatcher.
//!
//! A [`SinkConfig`] names where log lines go and how writer-backed
//! destinations shape them. It can be built in code, deserialized (with the
//! `serde` feature), or read from the environment:
//!
//! | Variable                  | Values                                                   |
//! |---------------------------|----------------------------------------------------------|
//! | `CADMUS_LOG_DESTINATION`  | `stdout`, `stderr`, `file:<path>`, `syslog[:<facility>[:<tag>]]`, `tracing` |
//! | `CADMUS_LOG_TIMESTAMPS`   | `rfc3339`, `compact`, `none`                             |
//! | `CADMUS_LOG_APPEND`       | `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`)    |
//!
//! Unset variables keep their defaults: standard output, no timestamps,
//! newline-terminated lines, files opened for appending.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use logging::{Backend, ConsoleBackend};

use crate::error::SinkError;
use crate::line_mode::LineMode;
use crate::sink::{WriterBackend, open_log_file};
#[cfg(unix)]
use crate::syslog::{DEFAULT_SYSLOG_TAG, SyslogBackend, SyslogConfig, SyslogFacility};
use crate::timestamp::TimestampFormat;
#[cfg(feature = "tracing")]
use crate::tracing_backend::TracingBackend;

/// Environment variable selecting the [`Destination`].
pub const DESTINATION_VAR: &str = "CADMUS_LOG_DESTINATION";
/// Environment variable selecting the [`TimestampFormat`].
pub const TIMESTAMPS_VAR: &str = "CADMUS_LOG_TIMESTAMPS";
/// Environment variable choosing between appending to and truncating a log file.
pub const APPEND_VAR: &str = "CADMUS_LOG_APPEND";

/// Where log lines are sent.
///
/// Parses from and displays as the strings accepted by
/// `CADMUS_LOG_DESTINATION`.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use logging_sink::Destination;
///
/// assert_eq!("stderr".parse::<Destination>()?, Destination::Stderr);
/// assert_eq!(
///     "file:/var/log/app.log".parse::<Destination>()?,
///     Destination::File(PathBuf::from("/var/log/app.log"))
/// );
/// assert!("pager".parse::<Destination>().is_err());
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Destination {
    /// Standard output, in the console format.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// A file, created when missing.
    File(PathBuf),
    /// The system logger.
    #[cfg(unix)]
    Syslog(SyslogConfig),
    /// The current `tracing` subscriber.
    #[cfg(feature = "tracing")]
    Tracing,
}

#[cfg(unix)]
fn parse_syslog(rest: Option<&str>) -> Result<Destination, SinkError> {
    let config = match rest {
        None => SyslogConfig::default(),
        Some(rest) => {
            let (facility, tag) = rest.split_once(':').unwrap_or((rest, DEFAULT_SYSLOG_TAG));
            SyslogConfig::new(facility.parse::<SyslogFacility>()?, tag)
        }
    };
    Ok(Destination::Syslog(config))
}

impl FromStr for Destination {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (kind, rest) = match trimmed.split_once(':') {
            Some((kind, rest)) => (kind, Some(rest)),
            None => (trimmed, None),
        };
        match (kind.to_ascii_lowercase().as_str(), rest) {
            ("stdout", None) => Ok(Self::Stdout),
            ("stderr", None) => Ok(Self::Stderr),
            ("file", Some(path)) if !path.is_empty() => Ok(Self::File(PathBuf::from(path))),
            #[cfg(unix)]
            ("syslog", rest) => parse_syslog(rest),
            #[cfg(feature = "tracing")]
            ("tracing", None) => Ok(Self::Tracing),
            _ => Err(SinkError::UnknownDestination(s.to_owned())),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            #[cfg(unix)]
            Self::Syslog(config) => write!(f, "syslog:{}:{}", config.facility(), config.tag()),
            #[cfg(feature = "tracing")]
            Self::Tracing => f.write_str("tracing"),
        }
    }
}

impl TryFrom<String> for Destination {
    type Error = SinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Destination> for String {
    fn from(destination: Destination) -> Self {
        destination.to_string()
    }
}

/// Complete description of the backend to install.
///
/// `timestamps` and `line_mode` shape writer-backed destinations (standard
/// output and error, files); syslog and tracing ignore them. `append` only
/// matters for files.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use logging_sink::{Destination, SinkConfig, TimestampFormat};
///
/// let vars = HashMap::from([
///     ("CADMUS_LOG_DESTINATION", "stderr"),
///     ("CADMUS_LOG_TIMESTAMPS", "compact"),
/// ]);
/// let config = SinkConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))?;
///
/// assert_eq!(config.destination, Destination::Stderr);
/// assert_eq!(config.timestamps, Some(TimestampFormat::Compact));
/// assert!(config.append);
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SinkConfig {
    /// Where lines go.
    pub destination: Destination,
    /// Timestamp prefix, if any.
    pub timestamps: Option<TimestampFormat>,
    /// Whether lines end with a newline.
    pub line_mode: LineMode,
    /// Append to an existing log file instead of truncating it.
    pub append: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            destination: Destination::Stdout,
            timestamps: None,
            line_mode: LineMode::WithNewline,
            append: true,
        }
    }
}

impl SinkConfig {
    /// Creates the default configuration for `destination`.
    #[must_use]
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            ..Self::default()
        }
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// Unset and empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error of the first variable holding an invalid
    /// value.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, SinkError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(destination) = value(DESTINATION_VAR) {
            config.destination = destination.parse()?;
        }
        if let Some(timestamps) = value(TIMESTAMPS_VAR) {
            config.timestamps = parse_timestamps(&timestamps)?;
        }
        if let Some(append) = value(APPEND_VAR) {
            config.append = parse_flag(APPEND_VAR, &append)?;
        }
        Ok(config)
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`from_lookup`](Self::from_lookup).
    pub fn from_env() -> Result<Self, SinkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the backend this configuration describes.
    ///
    /// Standard output with no timestamps and newline-terminated lines
    /// builds the [`ConsoleBackend`] itself.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::OpenFile`] when a file destination cannot be
    /// opened.
    pub fn build(&self) -> Result<Arc<dyn Backend>, SinkError> {
        let backend: Arc<dyn Backend> = match &self.destination {
            Destination::Stdout if self.is_plain() => Arc::new(ConsoleBackend::new()),
            Destination::Stdout => Arc::new(self.writer_backend(io::stdout())),
            Destination::Stderr => Arc::new(self.writer_backend(io::stderr())),
            Destination::File(path) => {
                Arc::new(self.writer_backend(open_log_file(path, self.append)?))
            }
            #[cfg(unix)]
            Destination::Syslog(config) => Arc::new(SyslogBackend::open(config.clone())),
            #[cfg(feature = "tracing")]
            Destination::Tracing => Arc::new(TracingBackend::new()),
        };
        Ok(backend)
    }

    /// Builds the backend and installs it in the shared dispatcher.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build). The shared dispatcher is left unchanged
    /// when building fails.
    pub fn install(&self) -> Result<(), SinkError> {
        let backend = self.build()?;
        logging::shared().set_shared_backend(backend);
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "cadmus::config", destination = %self.destination, "log destination installed");
        Ok(())
    }

    fn is_plain(&self) -> bool {
        self.timestamps.is_none() && self.line_mode == LineMode::WithNewline
    }

    fn writer_backend<W>(&self, writer: W) -> WriterBackend<W> {
        let backend = WriterBackend::with_line_mode(writer, self.line_mode);
        match self.timestamps {
            Some(format) => backend.with_timestamps(format),
            None => backend,
        }
    }
}

fn parse_timestamps(value: &str) -> Result<Option<TimestampFormat>, SinkError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" | "off" => Ok(None),
        _ => value.parse().map(Some),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, SinkError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SinkError::InvalidFlag {
            key,
            value: value.to_owned(),
        }),
    }
}
