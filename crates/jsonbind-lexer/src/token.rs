//! Token types for the JSON lexer.

use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural tokens
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LSquare,
    /// `]`
    RSquare,
    /// `:`
    Colon,
    /// `,`
    Comma,

    // Text tokens, classified by the context they were read in
    /// Object property name or map key.
    Name,
    /// Scalar value after a colon, or a top-level scalar.
    Value,
    /// Array element.
    Item,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Whether tokens of this kind carry a text payload.
    pub fn has_text(&self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::Value | TokenKind::Item)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LSquare => "'['",
            TokenKind::RSquare => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Name => "name",
            TokenKind::Value => "value",
            TokenKind::Item => "item",
            TokenKind::Eof => "end of input",
        })
    }
}

/// A token with its kind and unquoted text.
///
/// `text` is `None` for structural tokens and for the bare literal `null`.
/// A quoted `"null"` keeps its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    /// Whether the text was written between quotes.
    pub quoted: bool,
}

impl Token {
    pub fn new(kind: TokenKind, text: Option<String>, quoted: bool) -> Self {
        Self { kind, text, quoted }
    }

    /// A token without payload.
    pub fn structural(kind: TokenKind) -> Self {
        Self {
            kind,
            text: None,
            quoted: false,
        }
    }

    /// The text payload, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether this is a text token standing for the `null` literal.
    pub fn is_null(&self) -> bool {
        self.kind.has_text() && self.text.is_none()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, self.kind.has_text()) {
            (Some(text), true) => write!(f, "{} {:?}", self.kind, text),
            (None, true) => write!(f, "{} null", self.kind),
            _ => write!(f, "{}", self.kind),
        }
    }
}
