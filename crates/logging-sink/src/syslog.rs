//! crates/logging-sink/src/syslog.rs
//! Syslog destination over libc `openlog`/`syslog`/`closelog`.
//!
//! The connection is process-wide: syslog(3) keeps a single ident and
//! facility. Guards are counted, and the connection is closed only when the
//! last live [`SyslogGuard`] is dropped, so replacing one [`SyslogBackend`]
//! with another never tears down the connection the new one uses.

use std::ffi::{CStr, CString, NulError};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use logging::{Backend, CallSite, Line, Severity, fallback};

use crate::error::SinkError;

/// Syslog facility codes matching the POSIX syslog(3) constants.
///
/// Each variant corresponds to a `LOG_*` facility from `<syslog.h>`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum SyslogFacility {
    /// Kernel messages (LOG_KERN).
    Kern = libc::LOG_KERN,
    /// User-level messages (LOG_USER), the default.
    #[default]
    User = libc::LOG_USER,
    /// Mail system (LOG_MAIL).
    Mail = libc::LOG_MAIL,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Messages generated internally by syslogd (LOG_SYSLOG).
    Syslog = libc::LOG_SYSLOG,
    /// Line printer subsystem (LOG_LPR).
    Lpr = libc::LOG_LPR,
    /// Network news subsystem (LOG_NEWS).
    News = libc::LOG_NEWS,
    /// UUCP subsystem (LOG_UUCP).
    Uucp = libc::LOG_UUCP,
    /// Clock daemon (LOG_CRON).
    Cron = libc::LOG_CRON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Every facility, in `<syslog.h>` order.
    pub const ALL: [Self; 18] = [
        Self::Kern,
        Self::User,
        Self::Mail,
        Self::Daemon,
        Self::Auth,
        Self::Syslog,
        Self::Lpr,
        Self::News,
        Self::Uucp,
        Self::Cron,
        Self::Local0,
        Self::Local1,
        Self::Local2,
        Self::Local3,
        Self::Local4,
        Self::Local5,
        Self::Local6,
        Self::Local7,
    ];

    /// Parses a facility name, ignoring case.
    ///
    /// Returns `None` for unrecognised names.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("daemon"), Some(SyslogFacility::Daemon));
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("unknown"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|facility| facility.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the lowercase facility name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kern => "kern",
            Self::User => "user",
            Self::Mail => "mail",
            Self::Daemon => "daemon",
            Self::Auth => "auth",
            Self::Syslog => "syslog",
            Self::Lpr => "lpr",
            Self::News => "news",
            Self::Uucp => "uucp",
            Self::Cron => "cron",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyslogFacility {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| SinkError::UnknownFacility(s.to_owned()))
    }
}

/// Default syslog ident.
pub const DEFAULT_SYSLOG_TAG: &str = "cadmus";

/// Facility and ident passed to `openlog(3)`.
///
/// Constructing a [`SyslogConfig`] does not open the connection; call
/// [`open`](SyslogConfig::open) or build a [`SyslogBackend`].
///
/// # Examples
///
/// ```
/// use logging_sink::syslog::{SyslogConfig, SyslogFacility};
///
/// let config = SyslogConfig::new(SyslogFacility::Local5, "my-daemon");
/// assert_eq!(config.facility(), SyslogFacility::Local5);
/// assert_eq!(config.tag(), "my-daemon");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and tag.
    pub fn new(facility: SyslogFacility, tag: impl Into<String>) -> Self {
        Self {
            facility,
            tag: tag.into(),
        }
    }

    /// Returns the configured facility.
    #[must_use]
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured tag (ident string).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Opens the syslog connection.
    ///
    /// The ident of the first call is kept for the life of the process,
    /// since syslog(3) holds on to the pointer; later calls only change the
    /// facility, and a differing tag is reported through
    /// [`fallback::report`]. A tag containing a NUL byte falls back to
    /// [`DEFAULT_SYSLOG_TAG`].
    pub fn open(&self) -> SyslogGuard {
        let ident = retained_ident(&self.tag);
        if ident.to_bytes() != self.tag.as_bytes() {
            fallback::report(
                "syslog backend",
                &format_args!(
                    "tag {:?} ignored, connection keeps ident {:?}",
                    self.tag,
                    ident.to_string_lossy()
                ),
            );
        }

        let mut open = live_guards();
        // SAFETY: `ident` lives in a static for the rest of the process, so
        // the pointer retained by openlog stays valid.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, self.facility as libc::c_int);
        }
        *open += 1;

        SyslogGuard { _private: () }
    }
}

static IDENT: OnceLock<CString> = OnceLock::new();
static LIVE_GUARDS: Mutex<usize> = Mutex::new(0);

fn retained_ident(tag: &str) -> &'static CStr {
    IDENT.get_or_init(|| CString::new(tag).unwrap_or_else(|_| default_ident()))
}

// Held across openlog/closelog so the count and the connection agree.
fn live_guards() -> MutexGuard<'static, usize> {
    LIVE_GUARDS.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_TAG)
    }
}

fn default_ident() -> CString {
    CString::from(c"cadmus")
}

/// Syslog priority levels matching the POSIX syslog(3) severity constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// System is unusable (LOG_EMERG).
    Emergency = libc::LOG_EMERG,
    /// Action must be taken immediately (LOG_ALERT).
    Alert = libc::LOG_ALERT,
    /// Critical conditions (LOG_CRIT).
    Critical = libc::LOG_CRIT,
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = libc::LOG_NOTICE,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl From<Severity> for SyslogPriority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Verbose | Severity::Debug => Self::Debug,
            Severity::Info => Self::Info,
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
        }
    }
}

/// Sends `message` to syslog(3) with the given priority.
///
/// The message is passed as the argument of a `"%s"` format so `%` in the
/// text is never interpreted.
///
/// # Errors
///
/// Fails without sending anything when `message` contains a NUL byte.
pub fn syslog_message(priority: SyslogPriority, message: &str) -> Result<(), NulError> {
    let message = CString::new(message)?;

    // SAFETY: both arguments are valid NUL-terminated strings and the format
    // consumes exactly one string argument.
    unsafe {
        libc::syslog(priority as libc::c_int, c"%s".as_ptr(), message.as_ptr());
    }
    Ok(())
}

/// Keeps the syslog connection open.
///
/// The connection is closed when the last live guard is dropped.
///
/// # Examples
///
/// ```no_run
/// use logging_sink::syslog::{SyslogConfig, SyslogPriority, syslog_message};
///
/// let _guard = SyslogConfig::default().open();
/// syslog_message(SyslogPriority::Info, "daemon started")?;
/// # Ok::<(), std::ffi::NulError>(())
/// ```
#[derive(Debug)]
pub struct SyslogGuard {
    _private: (),
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        let mut open = live_guards();
        *open = open.saturating_sub(1);
        if *open == 0 {
            // SAFETY: closelog has no preconditions.
            unsafe {
                libc::closelog();
            }
        }
    }
}

/// Backend sending each call to syslog(3).
///
/// The line body uses the console layout without a trailing newline;
/// syslog adds its own timestamp, ident, and PID. Severities map to
/// priorities through [`SyslogPriority::from`]. The connection closes when
/// the last open backend or guard is dropped.
///
/// # Examples
///
/// ```no_run
/// use logging_sink::syslog::{SyslogBackend, SyslogConfig, SyslogFacility};
///
/// let backend = SyslogBackend::open(SyslogConfig::new(SyslogFacility::Daemon, "sync-agent"));
/// logging::set_backend(backend);
/// logging::log_info!("agent started");
/// ```
#[derive(Debug)]
pub struct SyslogBackend {
    config: SyslogConfig,
    _guard: SyslogGuard,
}

impl SyslogBackend {
    /// Opens the syslog connection described by `config`.
    #[must_use]
    pub fn open(config: SyslogConfig) -> Self {
        let guard = config.open();
        Self {
            config,
            _guard: guard,
        }
    }

    /// Returns the configuration the connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &SyslogConfig {
        &self.config
    }
}

impl Backend for SyslogBackend {
    fn log(&self, severity: Severity, message: &str, site: &CallSite) {
        let line = Line::new(severity, message, site).to_string();
        if let Err(error) = syslog_message(SyslogPriority::from(severity), &line) {
            fallback::report("syslog backend", &error);
        }
    }
}
