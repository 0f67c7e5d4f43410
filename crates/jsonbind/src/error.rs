//! Error type for parsing and serialization.

use std::fmt;
use std::io;

use ariadne::{Color, Label, Report, ReportKind, Source};
use jsonbind_lexer::{LexError, LexErrorKind, Snapshot};
use jsonbind_types::{ConvertError, TypeError};

/// Recent input captured when a parse error surfaced.
pub type ErrorContext = Snapshot;

/// A fatal parse or serialization error.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    /// Where in the input the error was detected. Absent for errors raised
    /// before any input was read and for serialization errors.
    pub context: Option<ErrorContext>,
}

/// Kind of error.
#[derive(Debug)]
pub enum ErrorKind {
    /// A token appeared where the structure mandates something else.
    Syntax { message: String },
    /// Input ended inside a token or structure.
    UnexpectedEof,
    /// The requested type cannot be built, e.g. a container without its
    /// type arguments.
    UnsupportedType { message: String },
    /// Text that does not convert to the expected scalar type.
    InvalidScalar { text: String, expected: String },
    /// Arrays, maps and objects nested deeper than the configured limit.
    TooDeep { max_depth: usize },
    /// A type name that is not registered.
    UnknownType { name: String },
    /// Any other type configuration error.
    Type(TypeError),
    /// The underlying reader or writer failed.
    Io(io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax {
            message: message.into(),
        })
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedType {
            message: message.into(),
        })
    }

    /// Attach `context` unless the error already carries one.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        if self.context.is_none() {
            self.context = Some(context);
        }
        self
    }

    /// Render this error with ariadne, pointing at the last character read
    /// in the recorded input sample.
    pub fn render(&self, filename: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: io::Write>(&self, filename: &str, writer: W) {
        let sample = self
            .context
            .as_ref()
            .map(|context| context.sample.as_str())
            .unwrap_or_default();
        let len = sample.chars().count();
        let range = len.saturating_sub(1)..len;
        let label = match &self.context {
            Some(ErrorContext {
                char_index: Some(index),
                ..
            }) => format!("char #{}", index),
            _ => "start of input".to_string(),
        };

        let mut report =
            Report::build(ReportKind::Error, (filename, range.clone())).with_message(self.kind.to_string());
        if len > 0 {
            report = report.with_label(
                Label::new((filename, range))
                    .with_message(label)
                    .with_color(Color::Red),
            );
        }
        let _ = report
            .finish()
            .write((filename, Source::from(sample)), writer);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{} at {}", self.kind, context),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Type(err) => Some(err),
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax { message } => write!(f, "syntax error: {}", message),
            ErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
            ErrorKind::UnsupportedType { message } => write!(f, "unsupported type: {}", message),
            ErrorKind::InvalidScalar { text, expected } => {
                write!(f, "invalid value '{}', expected {}", text, expected)
            }
            ErrorKind::TooDeep { max_depth } => {
                write!(f, "nesting too deep: more than {} levels", max_depth)
            }
            ErrorKind::UnknownType { name } => write!(f, "unknown type '{}'", name),
            ErrorKind::Type(err) => write!(f, "{}", err),
            ErrorKind::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        let kind = match err.kind {
            LexErrorKind::UnexpectedEof | LexErrorKind::ReadPastEnd => ErrorKind::UnexpectedEof,
            LexErrorKind::Io(err) => ErrorKind::Io(err),
            other => ErrorKind::Syntax {
                message: other.to_string(),
            },
        };
        Self {
            kind,
            context: Some(err.context),
        }
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Self::new(match err {
            TypeError::UnknownType { name } => ErrorKind::UnknownType { name },
            TypeError::UnsupportedShape { message } => ErrorKind::UnsupportedType { message },
            other => ErrorKind::Type(other),
        })
    }
}

impl From<ConvertError> for Error {
    fn from(err: ConvertError) -> Self {
        Self::new(ErrorKind::InvalidScalar {
            text: err.text,
            expected: err.expected,
        })
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonbind_testhelpers::setup;

    #[test]
    fn test_lex_error_keeps_context() {
        setup();
        let context = Snapshot {
            char_index: Some(3),
            sample: "[1 2".to_string(),
        };
        let err: Error = LexError::new(
            LexErrorKind::WhitespaceInBareToken {
                text: "1".to_string(),
            },
            context.clone(),
        )
        .into();
        assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
        assert_eq!(err.context, Some(context));
    }

    #[test]
    fn test_type_errors_map_to_kinds() {
        setup();
        let err: Error = TypeError::UnknownType {
            name: "app.Missing".to_string(),
        }
        .into();
        assert!(matches!(err.kind, ErrorKind::UnknownType { ref name } if name == "app.Missing"));

        let err: Error = TypeError::UnsupportedShape {
            message: "raw list".to_string(),
        }
        .into();
        assert!(matches!(err.kind, ErrorKind::UnsupportedType { .. }));
    }

    #[test]
    fn test_with_context_keeps_first() {
        setup();
        let first = Snapshot {
            char_index: Some(0),
            sample: "x".to_string(),
        };
        let second = Snapshot {
            char_index: Some(5),
            sample: "abcdef".to_string(),
        };
        let err = Error::syntax("boom")
            .with_context(first.clone())
            .with_context(second);
        assert_eq!(err.context, Some(first));
    }

    #[test]
    fn test_display_without_context() {
        setup();
        let err = Error::unsupported("List requires 1 type argument(s)");
        assert_eq!(
            err.to_string(),
            "unsupported type: List requires 1 type argument(s)"
        );
    }
}
