use std::sync::{Mutex, MutexGuard, PoisonError};

use super::WriterBackend;
use crate::line_mode::LineMode;
use crate::timestamp::TimestampFormat;

impl<W> WriterBackend<W> {
    /// Creates a backend that appends a newline after each line.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a backend with the provided [`LineMode`].
    #[must_use]
    pub const fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer: Mutex::new(writer),
            line_mode,
            timestamps: None,
        }
    }

    /// Prefixes every line with its capture time rendered in `format`.
    #[must_use]
    pub const fn with_timestamps(mut self, format: TimestampFormat) -> Self {
        self.timestamps = Some(format);
        self
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Returns the timestamp format, when lines carry one.
    #[must_use]
    pub const fn timestamps(&self) -> Option<TimestampFormat> {
        self.timestamps
    }

    /// Consumes the backend and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> Default for WriterBackend<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}
