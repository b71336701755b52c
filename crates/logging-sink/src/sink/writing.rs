use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::SystemTime;

use logging::{Backend, CallSite, Line, Severity, fallback};

use super::WriterBackend;

impl<W> WriterBackend<W> {
    /// Renders one call into the exact bytes this backend would write.
    ///
    /// A site without a capture time is stamped with the current time when
    /// timestamps are enabled.
    #[must_use]
    pub fn render(&self, severity: Severity, message: &str, site: &CallSite) -> String {
        let mut line = String::with_capacity(message.len() + 64);
        if let Some(format) = self.timestamps {
            let at = site.timestamp().unwrap_or_else(SystemTime::now);
            match format.render(at) {
                Ok(stamp) => {
                    line.push_str(&stamp);
                    line.push(' ');
                }
                Err(error) => fallback::report("writer backend timestamp", &error),
            }
        }
        let _ = write!(line, "{}", Line::new(severity, message, site));
        if self.line_mode.append_newline() {
            line.push('\n');
        }
        line
    }
}

impl<W> WriterBackend<W>
where
    W: Write,
{
    /// Writes one call and flushes the writer.
    ///
    /// Unlike [`Backend::log`], failures are returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the underlying writer.
    pub fn try_log(&self, severity: Severity, message: &str, site: &CallSite) -> io::Result<()> {
        let line = self.render(severity, message, site);
        let mut writer = self.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

impl<W> Backend for WriterBackend<W>
where
    W: Write + Send,
{
    fn log(&self, severity: Severity, message: &str, site: &CallSite) {
        if let Err(error) = self.try_log(severity, message, site) {
            fallback::report("writer backend", &error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_mode::LineMode;
    use crate::timestamp::TimestampFormat;
    use std::time::Duration;

    const SITE: CallSite = CallSite::new("/srv/app/src/sync.rs", "pull", 88);

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn output(backend: WriterBackend<Vec<u8>>) -> String {
        String::from_utf8(backend.into_inner()).unwrap()
    }

    #[test]
    fn writes_console_layout_with_newline() {
        let backend = WriterBackend::new(Vec::new());
        backend.error("conflict", &SITE);
        assert_eq!(output(backend), "[🔥 sync.rs:pull@88]: conflict\n");
    }

    #[test]
    fn without_newline_concatenates_lines() {
        let backend = WriterBackend::with_line_mode(Vec::new(), LineMode::WithoutNewline);
        backend.info("a", &SITE);
        backend.info("b", &SITE);
        assert_eq!(
            output(backend),
            "[💡 sync.rs:pull@88]: a[💡 sync.rs:pull@88]: b"
        );
    }

    #[test]
    fn timestamp_prefix_uses_capture_time() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
        let backend = WriterBackend::new(Vec::new()).with_timestamps(TimestampFormat::Compact);
        backend.debug("tick", &SITE.with_timestamp(at));
        assert_eq!(
            output(backend),
            "1970-01-02 00:00:00.000 [🐞 sync.rs:pull@88]: tick\n"
        );
    }

    #[test]
    fn missing_capture_time_is_stamped_now() {
        let backend = WriterBackend::new(Vec::<u8>::new()).with_timestamps(TimestampFormat::Rfc3339);
        let line = backend.render(Severity::Info, "x", &SITE);
        assert!(line.ends_with(" [💡 sync.rs:pull@88]: x\n"));
        assert!(line.len() > "[💡 sync.rs:pull@88]: x\n".len());
    }

    #[test]
    fn error_overload_renders_error_description() {
        let backend = WriterBackend::new(Vec::new());
        backend.report_warning(&io::Error::other("low disk"), &SITE);
        assert_eq!(output(backend), "[☢ sync.rs:pull@88]: low disk\n");
    }

    #[test]
    fn try_log_surfaces_write_failures() {
        let backend = WriterBackend::new(BrokenPipe);
        let error = backend.try_log(Severity::Info, "lost", &SITE).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn log_absorbs_write_failures() {
        let backend = WriterBackend::new(BrokenPipe);
        backend.info("lost", &SITE);
        backend.error("lost again", &SITE);
    }
}
