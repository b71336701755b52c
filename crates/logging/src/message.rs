//! crates/logging/src/message.rs
//! Log payloads accepted by the facade.

use std::error::Error;
use std::fmt;

/// Payload of a single log call.
///
/// Plain text, format arguments, describable values, and error values all
/// reduce to text exactly once before reaching a backend. An error value is
/// described through its [`Display`](fmt::Display) output, so it produces the
/// same text as logging that description directly.
#[derive(Copy, Clone)]
pub enum Message<'a> {
    /// Borrowed text.
    Text(&'a str),
    /// Pending `format_args!` output.
    Formatted(fmt::Arguments<'a>),
    /// Any value with a canonical [`Display`](fmt::Display) rendering.
    Describable(&'a (dyn fmt::Display + 'a)),
    /// An error value, described through its [`Display`](fmt::Display) output.
    Error(&'a (dyn Error + 'a)),
}

impl<'a> Message<'a> {
    /// Wraps a describable value.
    #[must_use]
    pub fn describe<D>(value: &'a D) -> Self
    where
        D: fmt::Display + 'a,
    {
        Self::Describable(value)
    }

    /// Wraps an error value.
    ///
    /// Boxed trait objects can be passed by re-borrowing them, e.g.
    /// `Message::from_error(&&*boxed)`.
    #[must_use]
    pub fn from_error<E>(error: &'a E) -> Self
    where
        E: Error + 'a,
    {
        Self::Error(error)
    }

    /// Returns the error value when the message carries one.
    #[must_use]
    pub fn as_error(&self) -> Option<&'a (dyn Error + 'a)> {
        match *self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Invokes `f` with the text form of the message.
    ///
    /// Text and literal-only format arguments are passed through without
    /// allocating; every other variant is rendered into a temporary string.
    pub fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        match *self {
            Self::Text(text) => f(text),
            Self::Formatted(args) => match args.as_str() {
                Some(text) => f(text),
                None => f(&args.to_string()),
            },
            Self::Describable(value) => f(&value.to_string()),
            Self::Error(error) => f(&error.to_string()),
        }
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Formatted(args) => fmt::Display::fmt(args, f),
            Self::Describable(value) => fmt::Display::fmt(value, f),
            Self::Error(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Text(_) => "Text",
            Self::Formatted(_) => "Formatted",
            Self::Describable(_) => "Describable",
            Self::Error(_) => "Error",
        };
        f.debug_tuple(kind).field(&self.to_string()).finish()
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Message<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<fmt::Arguments<'a>> for Message<'a> {
    fn from(args: fmt::Arguments<'a>) -> Self {
        Self::Formatted(args)
    }
}
