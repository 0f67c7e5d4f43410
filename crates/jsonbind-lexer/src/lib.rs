//! A lexer for relaxed JSON.
//!
//! Reads characters from any [`std::io::Read`] and emits [`Token`]s whose
//! meaning (property name, value, array item) is decided by the structural
//! context they appear in. Every consumed character is kept in a small
//! [`Recorder`] so that errors can quote the input that led to them.

mod error;
pub use error::{LexError, LexErrorKind};

mod recorder;
pub use recorder::{Recorder, Snapshot};

mod source;
pub use source::CharSource;

mod token;
pub use token::{Token, TokenKind};

mod escape;

mod lexer;
pub use lexer::{Lexer, Mode};
