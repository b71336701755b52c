//! crates/logging-sink/src/sink/mod.rs
//! Backend writing formatted lines into any [`std::io::Write`] target.

use std::fmt;
use std::sync::Mutex;

use crate::line_mode::LineMode;
use crate::timestamp::TimestampFormat;

mod constructors;
mod file;
mod writing;

pub use file::{FileBackend, open_file};
pub(crate) use file::open_log_file;

/// Backend that renders each call as one line into a writer.
///
/// Lines use the same `[<tag> <file>:<function>@<line>]: <message>` layout as
/// [`ConsoleBackend`](logging::ConsoleBackend), optionally prefixed by the
/// call site's capture time. The writer sits behind a mutex and every call
/// is rendered fully before it is written, so lines from concurrent callers
/// never interleave. A line is flushed before the call returns.
///
/// Write failures are absorbed and reported through
/// [`logging::fallback`].
///
/// # Examples
///
/// Collect lines into a [`Vec<u8>`]:
///
/// ```
/// use logging::{Backend, CallSite};
/// use logging_sink::WriterBackend;
///
/// let backend = WriterBackend::new(Vec::new());
/// backend.info("ready", &CallSite::new("src/main.rs", "main", 7));
///
/// let output = String::from_utf8(backend.into_inner()).unwrap();
/// assert_eq!(output, "[💡 main.rs:main@7]: ready\n");
/// ```
///
/// Prefix each line with its capture time:
///
/// ```
/// use std::time::{Duration, SystemTime};
/// use logging::{Backend, CallSite};
/// use logging_sink::{TimestampFormat, WriterBackend};
///
/// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
/// let site = CallSite::new("src/main.rs", "main", 7).with_timestamp(at);
///
/// let backend = WriterBackend::new(Vec::new()).with_timestamps(TimestampFormat::Rfc3339);
/// backend.warning("slow", &site);
///
/// let output = String::from_utf8(backend.into_inner()).unwrap();
/// assert_eq!(output, "2023-11-14T22:13:20Z [☢ main.rs:main@7]: slow\n");
/// ```
pub struct WriterBackend<W> {
    writer: Mutex<W>,
    line_mode: LineMode,
    timestamps: Option<TimestampFormat>,
}

impl<W> fmt::Debug for WriterBackend<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterBackend")
            .field("writer", &self.writer)
            .field("line_mode", &self.line_mode)
            .field("timestamps", &self.timestamps)
            .finish()
    }
}
