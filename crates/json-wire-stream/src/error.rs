//! Error type shared by the streaming reader and writer.

use thiserror::Error;

/// A structural violation in a JSON document or in the order of calls made
/// against a reader or writer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Unexpected character at the given byte offset.
    #[error("unexpected character at offset {0}")]
    Syntax(usize),
    /// The document ended before the current value was complete.
    #[error("unexpected end of input at offset {0}")]
    Eof(usize),
    /// The document is not valid UTF-8 at the given byte offset.
    #[error("invalid utf-8 at offset {0}")]
    InvalidUtf8(usize),
    /// A read found a different token than the caller asked for.
    #[error("expected {expected} at offset {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },
    /// A writer call that is illegal in the current context, such as a
    /// value where a name is due or closing a container that is not open.
    #[error("{0}")]
    Misplaced(&'static str),
}
