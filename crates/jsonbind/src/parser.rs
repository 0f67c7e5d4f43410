//! Token-driven parser.
//!
//! Each value is parsed by one call of `Parser::parse_value` running a
//! small state machine over the lexer's tokens. Nested `{` and `[` regions
//! are pushed back and parsed by a recursive call with a fresh sink, chosen
//! from the type the enclosing sink expects next.

use std::io::Read;

use jsonbind_lexer::{Lexer, Token, TokenKind};
use jsonbind_types::{Category, ResolvedType, TypeRegistry, Value};
use tracing::{debug, trace, warn};

use crate::sink::{Input, Sink};
use crate::{Error, ErrorKind, ParseOptions, Result, Warning};

/// A parsed value with the non-fatal warnings raised while building it.
#[derive(Debug)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

/// Parser state within one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first token of the value.
    None,
    /// Right after the outer `{` in tagged mode.
    WaitForTag,
    WaitForName,
    WaitForColon,
    WaitForValue,
    /// Like [`State::WaitForName`], inside a map.
    WaitForKey,
    WaitForItem,
    WaitForCommaOrCloseBrace,
    WaitForCommaOrCloseSquare,
}

/// Where a value sits in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// The top-level value of a typed parse.
    Root,
    /// The top-level value of a tagged parse.
    Tagged,
    Nested,
}

impl State {
    fn expecting(self) -> &'static str {
        match self {
            State::None => "a value",
            State::WaitForTag => "the type tag",
            State::WaitForName => "a property name or '}'",
            State::WaitForColon => "':'",
            State::WaitForValue => "a value after ':'",
            State::WaitForKey => "a map key or '}'",
            State::WaitForItem => "an array item or ']'",
            State::WaitForCommaOrCloseBrace => "',' or '}'",
            State::WaitForCommaOrCloseSquare => "',' or ']'",
        }
    }
}

/// Parses one top-level value from a reader.
///
/// A parser serves a single call: every `parse` method consumes it.
pub struct Parser<'r, R> {
    lexer: Lexer<R>,
    registry: &'r TypeRegistry,
    options: ParseOptions,
    warnings: Vec<Warning>,
    /// Number of nested regions currently open.
    depth: usize,
}

impl<'r, R: Read> Parser<'r, R> {
    /// Create a parser with default (relaxed) options.
    pub fn new(reader: R, registry: &'r TypeRegistry) -> Self {
        Self::with_options(reader, registry, ParseOptions::default())
    }

    pub fn with_options(reader: R, registry: &'r TypeRegistry, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(reader),
            registry,
            options,
            warnings: Vec::new(),
            depth: 0,
        }
    }

    /// Parse a value of type `ty`.
    pub fn parse(mut self, ty: &ResolvedType) -> Result<Parsed<Value>> {
        debug!("Parsing {}", ty);
        let result = self.parse_root(Some(ty), Entry::Root);
        self.finish(result)
    }

    /// Parse an object whose type is named by its leading type tag property.
    pub fn parse_tagged(mut self) -> Result<Parsed<Value>> {
        debug!("Parsing tagged object");
        let result = self.parse_root(None, Entry::Tagged);
        self.finish(result)
    }

    /// Parse an array holding one value per requested type.
    ///
    /// Missing trailing values are `null`. In relaxed mode an empty input
    /// also yields all `null`s and surplus values are dropped.
    pub fn parse_arguments(mut self, types: &[ResolvedType]) -> Result<Parsed<Vec<Value>>> {
        debug!("Parsing {} argument(s)", types.len());
        let result = self.parse_arguments_inner(types);
        self.finish(result)
    }

    fn finish<T>(self, result: Result<T>) -> Result<Parsed<T>> {
        match result {
            Ok(value) => Ok(Parsed {
                value,
                warnings: self.warnings,
            }),
            Err(err) => Err(err.with_context(self.lexer.snapshot())),
        }
    }

    fn parse_root(&mut self, ty: Option<&ResolvedType>, entry: Entry) -> Result<Value> {
        let sink = Sink::for_type(ty, self.registry)?;
        let value = self.parse_value(sink, entry)?;
        self.check_end()?;
        Ok(value)
    }

    fn parse_arguments_inner(&mut self, types: &[ResolvedType]) -> Result<Vec<Value>> {
        if types.is_empty() {
            return Ok(Vec::new());
        }

        let token = self.lexer.read()?;
        match token.kind {
            TokenKind::LSquare => {}
            TokenKind::Eof if !self.options.is_strict() => {
                self.warn(Warning::EmptyArguments {
                    expected: types.len(),
                });
                return Ok(vec![Value::Null; types.len()]);
            }
            TokenKind::Eof => return Err(Error::new(ErrorKind::UnexpectedEof)),
            _ => {
                return Err(Error::syntax(format!(
                    "expected '[' to start arguments, found {}",
                    token
                )));
            }
        }

        let mut values = Vec::with_capacity(types.len());
        let mut index = 0;
        let mut state = State::WaitForItem;
        let mut after_comma = false;
        loop {
            let token = self.lexer.read()?;
            trace!("Arguments {:?}, token {}", state, token);
            let trailing = std::mem::replace(&mut after_comma, token.kind == TokenKind::Comma);
            state = match (state, token.kind) {
                (
                    State::WaitForItem,
                    TokenKind::Item | TokenKind::LBrace | TokenKind::LSquare,
                ) => {
                    let ty = types.get(index);
                    if ty.is_none() {
                        self.extra_argument(types.len(), index)?;
                    }
                    self.lexer.unread(token);
                    let sink = Sink::for_type(ty, self.registry)?;
                    let value = self.parse_value(sink, Entry::Nested)?;
                    if ty.is_some() {
                        values.push(value);
                    }
                    index += 1;
                    State::WaitForCommaOrCloseSquare
                }
                (State::WaitForItem, TokenKind::RSquare) => {
                    self.check_trailing_comma(trailing, ']')?;
                    break;
                }
                (State::WaitForCommaOrCloseSquare, TokenKind::Comma) => State::WaitForItem,
                (State::WaitForCommaOrCloseSquare, TokenKind::RSquare) => break,
                (_, TokenKind::Eof) => return Err(Error::new(ErrorKind::UnexpectedEof)),
                (state, _) => return Err(unexpected(&token, state)),
            };
        }

        values.resize(types.len(), Value::Null);
        self.check_end()?;
        Ok(values)
    }

    fn extra_argument(&mut self, expected: usize, index: usize) -> Result<()> {
        if self.options.is_strict() {
            return Err(Error::syntax(format!(
                "more arguments than the {} requested",
                expected
            )));
        }
        if index == expected {
            self.warn(Warning::ExtraArguments { expected });
        }
        Ok(())
    }

    /// Parse one value into `sink`, recursing into nested regions.
    fn parse_value(&mut self, mut sink: Sink, entry: Entry) -> Result<Value> {
        let tagged = entry == Entry::Tagged;
        let mut state = State::None;
        let mut after_comma = false;
        let mut first_name = true;
        loop {
            let token = self.lexer.read()?;
            trace!("State {:?}, token {}", state, token);
            let trailing = std::mem::replace(&mut after_comma, token.kind == TokenKind::Comma);
            state = match (state, token.kind) {
                (State::None, TokenKind::LBrace) if sink.accepts_object() => {
                    if tagged {
                        State::WaitForTag
                    } else if sink.is_map() {
                        State::WaitForKey
                    } else {
                        State::WaitForName
                    }
                }
                (State::None, TokenKind::LSquare) if sink.accepts_array() && !tagged => {
                    State::WaitForItem
                }
                (State::None, TokenKind::Value | TokenKind::Item) => {
                    self.check_bare(&token)?;
                    let Some(text) = token.text else {
                        return Ok(Value::Null);
                    };
                    if !sink.accepts_text() || tagged {
                        return Err(Error::syntax(format!(
                            "expected {}, found '{}'",
                            structure_for(&sink, tagged),
                            text
                        )));
                    }
                    self.accept(&mut sink, Input::Text(text))?;
                    return sink.instance(self.registry);
                }
                (State::None, TokenKind::LBrace | TokenKind::LSquare) => {
                    return Err(Error::syntax(format!(
                        "expected {}, found {}",
                        structure_for(&sink, tagged),
                        token
                    )));
                }

                (State::WaitForTag, TokenKind::Name) => {
                    sink = self.read_type_tag(&token)?;
                    State::WaitForCommaOrCloseBrace
                }
                (State::WaitForName, TokenKind::Name) => {
                    self.check_bare(&token)?;
                    let Some(name) = token.text else {
                        return Err(Error::syntax("null is not a property name"));
                    };
                    if let Some(warning) = sink.set_field(&name, self.registry)? {
                        if entry == Entry::Root
                            && first_name
                            && name == self.options.type_tag_key
                        {
                            return Err(Error::syntax(format!(
                                "type tag '{}' given for a requested type",
                                name
                            )));
                        }
                        self.warn(warning);
                    }
                    first_name = false;
                    State::WaitForColon
                }
                (State::WaitForKey, TokenKind::Name) => {
                    self.check_bare(&token)?;
                    sink.set_key(Input::from_text(token.text));
                    State::WaitForColon
                }
                (State::WaitForKey, TokenKind::LBrace) => {
                    self.lexer.unread(token);
                    let key = self.parse_nested(sink.key_type().cloned())?;
                    sink.set_key(Input::Built(key));
                    State::WaitForColon
                }
                (State::WaitForName | State::WaitForKey, TokenKind::RBrace) => {
                    self.check_trailing_comma(trailing, '}')?;
                    return sink.instance(self.registry);
                }
                (State::WaitForColon, TokenKind::Colon) => State::WaitForValue,
                (State::WaitForValue, TokenKind::Value) => {
                    self.check_bare(&token)?;
                    self.accept_text(&mut sink, token.text)?;
                    State::WaitForCommaOrCloseBrace
                }
                (State::WaitForValue, TokenKind::LBrace | TokenKind::LSquare) => {
                    self.lexer.unread(token);
                    let value = self.parse_nested(sink.element_type().cloned())?;
                    self.accept(&mut sink, Input::Built(value))?;
                    State::WaitForCommaOrCloseBrace
                }
                (State::WaitForCommaOrCloseBrace, TokenKind::Comma) => {
                    if sink.is_map() {
                        State::WaitForKey
                    } else {
                        State::WaitForName
                    }
                }
                (State::WaitForCommaOrCloseBrace, TokenKind::RBrace) => {
                    return sink.instance(self.registry);
                }

                (State::WaitForItem, TokenKind::Item) => {
                    self.check_bare(&token)?;
                    self.accept_text(&mut sink, token.text)?;
                    State::WaitForCommaOrCloseSquare
                }
                (State::WaitForItem, TokenKind::LBrace | TokenKind::LSquare) => {
                    self.lexer.unread(token);
                    let value = self.parse_nested(sink.element_type().cloned())?;
                    self.accept(&mut sink, Input::Built(value))?;
                    State::WaitForCommaOrCloseSquare
                }
                (State::WaitForItem, TokenKind::RSquare) => {
                    self.check_trailing_comma(trailing, ']')?;
                    return sink.instance(self.registry);
                }
                (State::WaitForCommaOrCloseSquare, TokenKind::Comma) => State::WaitForItem,
                (State::WaitForCommaOrCloseSquare, TokenKind::RSquare) => {
                    return sink.instance(self.registry);
                }

                (_, TokenKind::Eof) => return Err(Error::new(ErrorKind::UnexpectedEof)),
                (state, _) => return Err(unexpected(&token, state)),
            };
        }
    }

    fn parse_nested(&mut self, ty: Option<ResolvedType>) -> Result<Value> {
        if self.depth >= self.options.max_depth {
            return Err(Error::new(ErrorKind::TooDeep {
                max_depth: self.options.max_depth,
            }));
        }
        self.depth += 1;
        let result = Sink::for_type(ty.as_ref(), self.registry)
            .and_then(|sink| self.parse_value(sink, Entry::Nested));
        self.depth -= 1;
        result
    }

    /// Read `"<key>": "<type name>"` and return the sink for the named type.
    fn read_type_tag(&mut self, name: &Token) -> Result<Sink> {
        let key = self.options.type_tag_key.as_str();
        if name.text() != Some(key) {
            return Err(Error::syntax(format!(
                "expected type tag '{}' as first property, found {}",
                key, name
            )));
        }
        self.expect(TokenKind::Colon)?;
        let token = self.lexer.read()?;
        let type_name = match (token.kind, token.text) {
            (TokenKind::Value, Some(text)) => text,
            (TokenKind::Eof, _) => return Err(Error::new(ErrorKind::UnexpectedEof)),
            (kind, _) => {
                return Err(Error::syntax(format!("expected a type name, found {}", kind)));
            }
        };
        let ty = ResolvedType::named(type_name);
        if self.registry.classify(&ty)? != Category::Structured {
            return Err(Error::unsupported(format!(
                "type tag '{}' does not name a structured type",
                ty
            )));
        }
        debug!("Type tag selects {}", ty);
        Sink::for_type(Some(&ty), self.registry)
    }

    /// Hand a text token's payload to `sink`, which must expect a scalar.
    fn accept_text(&mut self, sink: &mut Sink, text: Option<String>) -> Result<()> {
        if let (Some(text), Some(ty)) = (&text, sink.element_type())
            && self.registry.classify(ty)? != Category::ScalarLike
        {
            return Err(Error::syntax(format!(
                "expected '{{' or '[' for {}, found '{}'",
                ty, text
            )));
        }
        self.accept(sink, Input::from_text(text))
    }

    fn accept(&mut self, sink: &mut Sink, input: Input) -> Result<()> {
        if let Some(warning) = sink.accept(input, self.registry)? {
            self.warn(warning);
        }
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        let token = self.lexer.read()?;
        match token.kind {
            found if found == kind => Ok(()),
            TokenKind::Eof => Err(Error::new(ErrorKind::UnexpectedEof)),
            _ => Err(Error::syntax(format!("expected {}, found {}", kind, token))),
        }
    }

    /// In strict mode, only JSON literals may be written without quotes.
    fn check_bare(&self, token: &Token) -> Result<()> {
        if !self.options.is_strict() || token.quoted {
            return Ok(());
        }
        match token.text() {
            Some(text) if !is_literal(text) => Err(Error::syntax(format!(
                "unquoted {} '{}' in strict mode",
                token.kind, text
            ))),
            _ => Ok(()),
        }
    }

    fn check_trailing_comma(&self, trailing: bool, delimiter: char) -> Result<()> {
        if trailing && self.options.is_strict() {
            return Err(Error::syntax(format!("trailing comma before '{}'", delimiter)));
        }
        Ok(())
    }

    /// In strict mode, nothing but whitespace may follow the top-level value.
    fn check_end(&mut self) -> Result<()> {
        if !self.options.is_strict() {
            return Ok(());
        }
        let token = self.lexer.read()?;
        if token.kind != TokenKind::Eof {
            return Err(Error::syntax(format!(
                "trailing content after top-level value: {}",
                token
            )));
        }
        Ok(())
    }

    fn warn(&mut self, warning: Warning) {
        match &warning {
            Warning::MissingField { .. } => debug!("{}", warning),
            _ => warn!("{}", warning),
        }
        self.warnings.push(warning);
    }
}

fn unexpected(token: &Token, state: State) -> Error {
    Error::syntax(format!(
        "unexpected {}, expected {}",
        token,
        state.expecting()
    ))
}

fn structure_for(sink: &Sink, tagged: bool) -> &'static str {
    if tagged {
        "a tagged object"
    } else if sink.accepts_object() && sink.accepts_array() {
        "a value"
    } else if sink.accepts_object() {
        "'{'"
    } else if sink.accepts_array() {
        "'['"
    } else {
        "a scalar value"
    }
}

/// `true`, `false` or a number, decimal or `0x` hexadecimal.
fn is_literal(text: &str) -> bool {
    matches!(text, "true" | "false") || is_hex(text) || is_number(text)
}

fn is_hex(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"));
    digits.is_some_and(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_hexdigit()))
}

fn is_number(text: &str) -> bool {
    fn digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    let text = text.strip_prefix('-').unwrap_or(text);
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };
    let (int, fraction) = match mantissa.split_once('.') {
        Some((int, fraction)) => (int, Some(fraction)),
        None => (mantissa, None),
    };
    let int_ok = digits(int) && (int == "0" || !int.starts_with('0'));
    let fraction_ok = fraction.is_none_or(digits);
    let exponent_ok = exponent.is_none_or(|e| {
        digits(e.strip_prefix(['+', '-']).unwrap_or(e))
    });
    int_ok && fraction_ok && exponent_ok
}
