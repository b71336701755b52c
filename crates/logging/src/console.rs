//! crates/logging/src/console.rs
//! Default backend writing formatted lines to standard output.

use std::io::{self, Write};

use crate::backend::Backend;
use crate::call_site::CallSite;
use crate::fallback;
use crate::format::write_line;
use crate::severity::Severity;

/// Backend installed in the shared dispatcher until the application replaces it.
///
/// Each call writes one line of the form
/// `[<tag> <file name>:<function>@<line>]: <message>` to standard output. The
/// stdout lock is held for the whole line, so lines from concurrent threads
/// never interleave. Write failures, such as a closed pipe, are reported
/// through [`fallback::report`] and never reach the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsoleBackend;

impl ConsoleBackend {
    /// Creates the console backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConsoleBackend {
    fn emit<W: Write>(
        out: &mut W,
        severity: Severity,
        message: &str,
        site: &CallSite,
    ) -> io::Result<()> {
        write_line(out, severity, message, site)?;
        out.flush()
    }
}

impl Backend for ConsoleBackend {
    fn log(&self, severity: Severity, message: &str, site: &CallSite) {
        if let Err(error) = Self::emit(&mut io::stdout().lock(), severity, message, site) {
            fallback::report("console backend", &error);
        }
    }
}
