//! Context-sensitive JSON lexer.

use std::io::Read;

use tracing::trace;

use crate::escape::ValueBuilder;
use crate::{CharSource, LexError, LexErrorKind, Recorder, Snapshot, Token, TokenKind};

/// How the lexer interprets the next text token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Top level, before any structure: a bare scalar runs to end of input.
    Primitive,
    /// Inside an object, before a colon.
    Name,
    /// Inside an object, after a colon.
    Value,
    /// Inside an array.
    Item,
    /// End of input has been reported.
    End,
}

/// Turns a character stream into tokens.
///
/// Opening delimiters push the current [`Mode`] and closing delimiters pop it,
/// so text after a nested region is classified by its enclosing context.
/// Tokens can be pushed back to any depth with [`unread`](Self::unread).
pub struct Lexer<R> {
    source: CharSource<R>,
    mode: Mode,
    modes: Vec<Mode>,
    pending: Vec<Token>,
    builder: ValueBuilder,
}

impl<'a> Lexer<&'a [u8]> {
    /// Create a lexer over in-memory text.
    pub fn for_str(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: Read> Lexer<R> {
    /// Create a new lexer reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            source: CharSource::new(reader),
            mode: Mode::Primitive,
            modes: Vec::new(),
            pending: Vec::new(),
            builder: ValueBuilder::new(),
        }
    }

    /// Current interpretation mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The diagnostic recorder for this input.
    pub fn recorder(&self) -> &Recorder {
        self.source.recorder()
    }

    /// Current diagnostic snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.source.snapshot()
    }

    /// Push a token back; tokens are replayed last-in first-out.
    pub fn unread(&mut self, token: Token) {
        trace!("Unread {}", token);
        self.pending.push(token);
    }

    /// Read the next token.
    pub fn read(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.pending.pop() {
            return Ok(token);
        }
        if self.mode == Mode::End {
            return Err(self.source.error(LexErrorKind::ReadPastEnd));
        }

        self.source.skip_whitespace()?;
        let Some(c) = self.source.next()? else {
            self.mode = Mode::End;
            return Ok(self.emit(Token::structural(TokenKind::Eof)));
        };

        let token = match c {
            '{' => {
                self.modes.push(self.mode);
                self.mode = Mode::Name;
                Token::structural(TokenKind::LBrace)
            }
            '}' => {
                self.close('}')?;
                Token::structural(TokenKind::RBrace)
            }
            '[' => {
                self.modes.push(self.mode);
                self.mode = Mode::Item;
                Token::structural(TokenKind::LSquare)
            }
            ']' => {
                self.close(']')?;
                Token::structural(TokenKind::RSquare)
            }
            ':' => {
                self.mode = Mode::Value;
                Token::structural(TokenKind::Colon)
            }
            ',' => {
                self.mode = if self.mode == Mode::Value {
                    Mode::Name
                } else {
                    Mode::Item
                };
                Token::structural(TokenKind::Comma)
            }
            _ => {
                let kind = match self.mode {
                    Mode::Name => TokenKind::Name,
                    Mode::Primitive | Mode::Value => TokenKind::Value,
                    Mode::Item => TokenKind::Item,
                    Mode::End => return Err(self.source.error(LexErrorKind::ReadPastEnd)),
                };
                let (text, quoted) = self.collect(c)?;
                Token::new(kind, text, quoted)
            }
        };
        Ok(self.emit(token))
    }

    fn emit(&self, token: Token) -> Token {
        trace!("Token {} in {:?} mode", token, self.mode);
        token
    }

    fn close(&mut self, delimiter: char) -> Result<(), LexError> {
        match self.modes.pop() {
            Some(mode) => {
                self.mode = mode;
                Ok(())
            }
            None => Err(self.source.error(LexErrorKind::Unbalanced { delimiter })),
        }
    }

    /// Collect the text of a name, value or item starting with `first`.
    ///
    /// Returns the decoded text (`None` for the bare literal `null`) and
    /// whether it was quoted.
    fn collect(&mut self, first: char) -> Result<(Option<String>, bool), LexError> {
        self.builder.clear();

        if first == '"' {
            loop {
                let c = self.source.require()?;
                if c == '"' && !self.builder.in_escape() {
                    break;
                }
                self.push(c)?;
            }
            self.source.skip_whitespace()?;
            let text = self.finish()?;
            return Ok((Some(text), true));
        }

        if self.mode == Mode::Primitive {
            self.collect_primitive(first)?;
        } else {
            self.collect_bare(first)?;
        }

        let text = self.finish()?;
        if text == "null" {
            Ok((None, false))
        } else {
            Ok((Some(text), false))
        }
    }

    /// A top-level bare scalar runs to whitespace or end of input; only
    /// whitespace may follow it.
    fn collect_primitive(&mut self, first: char) -> Result<(), LexError> {
        let mut c = first;
        loop {
            self.push(c)?;
            match self.source.next()? {
                Some(next) if !next.is_whitespace() => c = next,
                Some(_) => {
                    self.source.skip_whitespace()?;
                    if self.source.next()?.is_some() {
                        return Err(self.source.error(LexErrorKind::TrailingContent));
                    }
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }

    /// A nested bare token runs to the next `} ] : ,`, which is pushed back.
    /// Whitespace may only trail it.
    fn collect_bare(&mut self, first: char) -> Result<(), LexError> {
        let mut c = first;
        let mut whitespace = false;
        loop {
            if c.is_whitespace() {
                whitespace = true;
                c = self.source.require()?;
                continue;
            }
            match c {
                '}' | ']' | ':' | ',' => {
                    self.source.unread(c);
                    return Ok(());
                }
                _ if whitespace => {
                    let text = self.builder.as_str().to_string();
                    return Err(self
                        .source
                        .error(LexErrorKind::WhitespaceInBareToken { text }));
                }
                _ => {
                    self.push(c)?;
                    c = self.source.require()?;
                }
            }
        }
    }

    fn push(&mut self, c: char) -> Result<(), LexError> {
        self.builder.push(c).map_err(|kind| self.source.error(kind))
    }

    fn finish(&mut self) -> Result<String, LexError> {
        self.builder.finish().map_err(|kind| self.source.error(kind))
    }
}
