//! Error types for type lookup, resolution and scalar conversion.

use std::fmt;

/// Error raised by the registry or the type resolver.
///
/// These are configuration errors: they depend only on the requested type
/// and the registered descriptors, never on the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// No type is registered under this name.
    UnknownType { name: String },
    /// A named type was used where a structured type is required.
    NotStructured { name: String },
    /// A type variable does not name a formal parameter of its owner.
    UnboundVariable { name: String, owner: String },
    /// Formal parameter count and actual argument count differ.
    ArityMismatch {
        owner: String,
        expected: usize,
        actual: usize,
    },
    /// The requested type cannot be constructed as given.
    UnsupportedShape { message: String },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UnknownType { name } => write!(f, "unknown type '{}'", name),
            TypeError::NotStructured { name } => {
                write!(f, "type '{}' is not a structured type", name)
            }
            TypeError::UnboundVariable { name, owner } => {
                write!(f, "type variable '{}' is not declared by '{}'", name, owner)
            }
            TypeError::ArityMismatch {
                owner,
                expected,
                actual,
            } => write!(
                f,
                "'{}' declares {} type parameter(s) but {} argument(s) were supplied",
                owner, expected, actual
            ),
            TypeError::UnsupportedShape { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for TypeError {}

/// Text that cannot be converted to the requested scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    pub text: String,
    pub expected: String,
}

impl ConvertError {
    pub fn new(text: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}', expected {}", self.text, self.expected)
    }
}

impl std::error::Error for ConvertError {}
