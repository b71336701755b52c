//! crates/logging/src/format.rs
//! Line format shared by the console backend and writer-based sinks.

use std::fmt;
use std::io::{self, Write};

use crate::call_site::CallSite;
use crate::severity::Severity;

/// Returns the final component of a source path.
///
/// Paths are split on `/`, and on `\` so that `file!()` values produced on
/// Windows hosts shorten the same way. A path without separators is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use logging::short_file_name;
///
/// assert_eq!(short_file_name("/a/b/c/File.ext"), "File.ext");
/// assert_eq!(short_file_name("File.ext"), "File.ext");
/// ```
#[must_use]
pub fn short_file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// A single formatted log line without its trailing newline.
///
/// Renders as `[<tag> <file name>:<function>@<line>]: <message>`. The call
/// site's timestamp is not part of this format.
///
/// # Examples
///
/// ```
/// use logging::{CallSite, Line, Severity};
///
/// let site = CallSite::new("/x/y/Z.swift", "run()", 42);
/// let line = Line::new(Severity::Info, "hello", &site);
/// assert_eq!(line.to_string(), "[💡 Z.swift:run()@42]: hello");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Line<'a> {
    severity: Severity,
    message: &'a str,
    site: &'a CallSite,
}

impl<'a> Line<'a> {
    /// Bundles the parts of a line for rendering.
    #[must_use]
    pub const fn new(severity: Severity, message: &'a str, site: &'a CallSite) -> Self {
        Self {
            severity,
            message,
            site,
        }
    }
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {}:{}@{}]: {}",
            self.severity.tag(),
            self.site.file_name(),
            self.site.function(),
            self.site.line(),
            self.message
        )
    }
}

/// Writes one newline-terminated [`Line`] into `writer`.
pub fn write_line<W>(
    writer: &mut W,
    severity: Severity,
    message: &str,
    site: &CallSite,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(writer, "{}", Line::new(severity, message, site))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_name_takes_last_segment() {
        assert_eq!(short_file_name("/a/b/c/File.ext"), "File.ext");
        assert_eq!(short_file_name("src/lib.rs"), "lib.rs");
        assert_eq!(short_file_name(r"C:\work\src\main.rs"), "main.rs");
    }

    #[test]
    fn short_name_without_separator_is_unchanged() {
        assert_eq!(short_file_name("File.ext"), "File.ext");
        assert_eq!(short_file_name(""), "");
    }

    #[test]
    fn trailing_separator_yields_empty_name() {
        assert_eq!(short_file_name("/a/b/"), "");
    }

    #[test]
    fn info_line_matches_reference_format() {
        let site = CallSite::new("/x/y/Z.swift", "run()", 42);
        let line = Line::new(Severity::Info, "hello", &site);
        assert_eq!(line.to_string(), "[💡 Z.swift:run()@42]: hello");
    }

    #[test]
    fn every_severity_uses_its_tag() {
        let site = CallSite::new("main.rs", "main", 1);
        let rendered: Vec<_> = Severity::ALL
            .iter()
            .map(|severity| Line::new(*severity, "m", &site).to_string())
            .collect();
        assert_eq!(
            rendered,
            [
                "[📢 main.rs:main@1]: m",
                "[💡 main.rs:main@1]: m",
                "[☢ main.rs:main@1]: m",
                "[🔥 main.rs:main@1]: m",
                "[🐞 main.rs:main@1]: m",
            ]
        );
    }

    #[test]
    fn empty_message_keeps_prefix() {
        let site = CallSite::new("/src/app.rs", "start", 3);
        let mut buffer = Vec::new();
        write_line(&mut buffer, Severity::Warning, "", &site).expect("write to vec");
        assert_eq!(buffer, "[☢ app.rs:start@3]: \n".as_bytes());
    }

    #[test]
    fn timestamp_is_not_rendered() {
        let site = CallSite::new("/src/app.rs", "start", 3)
            .with_timestamp(std::time::SystemTime::UNIX_EPOCH);
        let line = Line::new(Severity::Debug, "x", &site).to_string();
        assert_eq!(line, "[🐞 app.rs:start@3]: x");
    }

    #[test]
    fn write_line_emits_identical_lines_for_repeated_calls() {
        let site = CallSite::new("/src/app.rs", "start", 3);
        let mut buffer = Vec::new();
        write_line(&mut buffer, Severity::Info, "same", &site).expect("first write");
        write_line(&mut buffer, Severity::Info, "same", &site).expect("second write");
        let output = String::from_utf8(buffer).expect("utf-8");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines, ["[💡 app.rs:start@3]: same"; 2]);
    }

    proptest! {
        #[test]
        fn short_name_never_contains_separator(path in "[a-zA-Z0-9_./\\\\]{0,40}") {
            let name = short_file_name(&path);
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
            prop_assert!(path.ends_with(name));
        }

        #[test]
        fn bare_names_pass_through(name in "[a-zA-Z0-9_.]{1,24}") {
            prop_assert_eq!(short_file_name(&name), name.as_str());
        }
    }
}
