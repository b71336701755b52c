//! crates/logging-sink/src/timestamp.rs
//! Rendering of call-site capture times.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::error::SinkError;

const COMPACT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero].[subsecond digits:3]"
);

/// How a writer-backed destination prefixes each line with its timestamp.
///
/// Times are rendered in UTC.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
/// use logging_sink::TimestampFormat;
///
/// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
/// assert_eq!(TimestampFormat::Rfc3339.render(at)?, "2023-11-14T22:13:20Z");
/// assert_eq!(TimestampFormat::Compact.render(at)?, "2023-11-14 22:13:20.000");
/// # Ok::<(), time::error::Format>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimestampFormat {
    /// RFC 3339, e.g. `2023-11-14T22:13:20Z`.
    #[default]
    Rfc3339,
    /// Date and time with milliseconds, e.g. `2023-11-14 22:13:20.000`.
    Compact,
}

impl TimestampFormat {
    /// Renders `at` in this format.
    ///
    /// # Errors
    ///
    /// Fails when the instant cannot be represented, such as a year outside
    /// `0..=9999` for RFC 3339.
    pub fn render(self, at: SystemTime) -> Result<String, time::error::Format> {
        let at = OffsetDateTime::from(at);
        match self {
            Self::Rfc3339 => at.format(&Rfc3339),
            Self::Compact => at.format(COMPACT_FORMAT),
        }
    }

    /// Name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rfc3339 => "rfc3339",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimestampFormat {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rfc3339" => Ok(Self::Rfc3339),
            "compact" => Ok(Self::Compact),
            _ => Err(SinkError::UnknownTimestampFormat(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn instant(secs: u64, millis: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs) + Duration::from_millis(millis)
    }

    #[test]
    fn rfc3339_renders_utc() {
        let rendered = TimestampFormat::Rfc3339.render(instant(0, 0)).unwrap();
        assert_eq!(rendered, "1970-01-01T00:00:00Z");
    }

    #[test]
    fn compact_keeps_milliseconds() {
        let rendered = TimestampFormat::Compact
            .render(instant(1_700_000_000, 250))
            .unwrap();
        assert_eq!(rendered, "2023-11-14 22:13:20.250");
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for format in [TimestampFormat::Rfc3339, TimestampFormat::Compact] {
            assert_eq!(format.name().parse::<TimestampFormat>().unwrap(), format);
            assert_eq!(format.to_string(), format.name());
        }
        assert_eq!(
            " Compact ".parse::<TimestampFormat>().unwrap(),
            TimestampFormat::Compact
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let error = "iso".parse::<TimestampFormat>().unwrap_err();
        assert!(matches!(error, SinkError::UnknownTimestampFormat(ref name) if name == "iso"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&TimestampFormat::Compact).unwrap();
        assert_eq!(json, "\"compact\"");
    }
}
