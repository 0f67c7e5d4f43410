//! Incremental builder for token text with escape processing.

use crate::LexErrorKind;

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Char,
    Escape,
    Unicode,
}

/// Accumulates token text one character at a time, decoding
/// `\" \\ \/ \b \f \n \r \t` and `\uXXXX` as they arrive.
///
/// UTF-16 surrogate pairs written as two `\u` escapes are combined; an
/// unpaired surrogate becomes U+FFFD.
#[derive(Debug)]
pub(crate) struct ValueBuilder {
    text: String,
    state: State,
    digits: String,
    high: Option<u32>,
}

impl ValueBuilder {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            state: State::Char,
            digits: String::with_capacity(4),
            high: None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.state = State::Char;
        self.digits.clear();
        self.high = None;
    }

    /// Whether the builder is in the middle of an escape sequence.
    pub(crate) fn in_escape(&self) -> bool {
        self.state != State::Char
    }

    /// Text accumulated so far, without a pending surrogate.
    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn push(&mut self, c: char) -> Result<(), LexErrorKind> {
        match self.state {
            State::Char => {
                if c == '\\' {
                    self.state = State::Escape;
                } else {
                    self.push_char(c);
                }
            }
            State::Escape => {
                let unescaped = match c {
                    '"' => '"',
                    '\\' => '\\',
                    '/' => '/',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        self.state = State::Unicode;
                        self.digits.clear();
                        return Ok(());
                    }
                    other => {
                        return Err(LexErrorKind::InvalidEscape {
                            sequence: format!("\\{}", other),
                        });
                    }
                };
                self.state = State::Char;
                self.push_char(unescaped);
            }
            State::Unicode => {
                if !c.is_ascii_hexdigit() {
                    return Err(LexErrorKind::InvalidEscape {
                        sequence: format!("\\u{}{}", self.digits, c),
                    });
                }
                self.digits.push(c);
                if self.digits.len() == 4 {
                    self.state = State::Char;
                    let code = u32::from_str_radix(&self.digits, 16).map_err(|_| {
                        LexErrorKind::InvalidEscape {
                            sequence: format!("\\u{}", self.digits),
                        }
                    })?;
                    self.push_code(code);
                }
            }
        }
        Ok(())
    }

    /// Take the finished text, leaving the builder empty.
    pub(crate) fn finish(&mut self) -> Result<String, LexErrorKind> {
        match self.state {
            State::Char => {}
            State::Escape => {
                return Err(LexErrorKind::InvalidEscape {
                    sequence: "\\".to_string(),
                });
            }
            State::Unicode => {
                return Err(LexErrorKind::InvalidEscape {
                    sequence: format!("\\u{}", self.digits),
                });
            }
        }
        self.flush_high();
        Ok(std::mem::take(&mut self.text))
    }

    fn push_code(&mut self, code: u32) {
        match code {
            0xD800..=0xDBFF => {
                self.flush_high();
                self.high = Some(code);
            }
            0xDC00..=0xDFFF => match self.high.take() {
                Some(high) => {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
                    self.text.push(char::from_u32(combined).unwrap_or(REPLACEMENT));
                }
                None => self.text.push(REPLACEMENT),
            },
            _ => self.push_char(char::from_u32(code).unwrap_or(REPLACEMENT)),
        }
    }

    fn push_char(&mut self, c: char) {
        self.flush_high();
        self.text.push(c);
    }

    fn flush_high(&mut self) {
        if self.high.take().is_some() {
            self.text.push(REPLACEMENT);
        }
    }
}
