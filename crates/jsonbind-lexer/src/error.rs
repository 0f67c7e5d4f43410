//! Error types for lexing.

use std::fmt;
use std::io;

use crate::Snapshot;

/// Error raised while reading characters or assembling tokens.
#[derive(Debug)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub context: Snapshot,
}

impl LexError {
    pub fn new(kind: LexErrorKind, context: Snapshot) -> Self {
        Self { kind, context }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.context)
    }
}

impl std::error::Error for LexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LexErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Kind of lexer error.
#[derive(Debug)]
pub enum LexErrorKind {
    /// Input ended inside a token or structure.
    UnexpectedEof,
    /// A token was requested after the end token was already produced.
    ReadPastEnd,
    /// Unknown escape sequence inside a string.
    InvalidEscape { sequence: String },
    /// A bare token contained whitespace followed by more text.
    WhitespaceInBareToken { text: String },
    /// A closing delimiter without a matching opener.
    Unbalanced { delimiter: char },
    /// A top-level bare value was followed by more text.
    TrailingContent,
    /// The byte stream is not valid UTF-8.
    InvalidUtf8,
    /// The underlying reader failed.
    Io(io::Error),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
            LexErrorKind::ReadPastEnd => write!(f, "attempt to read tokens after end of input"),
            LexErrorKind::InvalidEscape { sequence } => {
                write!(f, "invalid escape sequence '{}'", sequence)
            }
            LexErrorKind::WhitespaceInBareToken { text } => {
                write!(f, "invalid unquoted value '{}' followed by whitespace", text)
            }
            LexErrorKind::Unbalanced { delimiter } => {
                write!(f, "unbalanced '{}'", delimiter)
            }
            LexErrorKind::TrailingContent => {
                write!(f, "trailing content after top-level value")
            }
            LexErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8 in input"),
            LexErrorKind::Io(err) => write!(f, "read error: {}", err),
        }
    }
}
