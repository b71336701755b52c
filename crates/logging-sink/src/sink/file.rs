use std::fs::{File, OpenOptions};
use std::path::Path;

use super::WriterBackend;
use crate::error::SinkError;

/// Writer backend appending lines to a file.
pub type FileBackend = WriterBackend<File>;

/// Opens `path` as a log destination, creating it when missing.
///
/// With `append` set, existing content is kept and lines are added at the
/// end; otherwise the file is truncated. The file is not buffered, so each
/// line reaches the operating system before the log call returns.
///
/// # Errors
///
/// Returns [`SinkError::OpenFile`] when the file cannot be opened for
/// writing.
///
/// # Examples
///
/// ```
/// use logging::{Backend, CallSite};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("app.log");
///
/// let backend = logging_sink::open_file(&path, true)?;
/// backend.info("started", &CallSite::new("src/main.rs", "main", 1));
///
/// assert_eq!(std::fs::read_to_string(&path)?, "[💡 main.rs:main@1]: started\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open_file(path: impl AsRef<Path>, append: bool) -> Result<FileBackend, SinkError> {
    open_log_file(path.as_ref(), append).map(WriterBackend::new)
}

pub(crate) fn open_log_file(path: &Path, append: bool) -> Result<File, SinkError> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path).map_err(|source| SinkError::OpenFile {
        path: path.to_path_buf(),
        source,
    })
}
