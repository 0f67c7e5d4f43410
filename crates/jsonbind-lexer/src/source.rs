//! Character source with single-slot pushback.

use std::io::{BufReader, Bytes, Read};

use crate::{LexError, LexErrorKind, Recorder, Snapshot};

/// Decodes UTF-8 characters from a reader, one at a time.
///
/// Every character decoded from the stream is recorded; characters replayed
/// from the pushback slot are not recorded twice.
pub struct CharSource<R> {
    bytes: Bytes<BufReader<R>>,
    /// Single pushback slot. A second `unread` overwrites the first.
    pending: Option<char>,
    recorder: Recorder,
}

impl<R: Read> CharSource<R> {
    /// Create a source over `reader` with a fresh recorder.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            pending: None,
            recorder: Recorder::new(),
        }
    }

    /// Next character, or `None` at end of input.
    pub fn next(&mut self) -> Result<Option<char>, LexError> {
        if let Some(c) = self.pending.take() {
            return Ok(Some(c));
        }
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };
        let c = self.decode(first)?;
        self.recorder.record(c);
        Ok(Some(c))
    }

    /// Next character; end of input is an error.
    pub fn require(&mut self) -> Result<char, LexError> {
        match self.next()? {
            Some(c) => Ok(c),
            None => Err(self.error(LexErrorKind::UnexpectedEof)),
        }
    }

    /// Push back one character to be returned by the next call to [`next`](Self::next).
    pub fn unread(&mut self, c: char) {
        self.pending = Some(c);
    }

    /// Consume whitespace, leaving the first non-whitespace character unread.
    pub fn skip_whitespace(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.next()? {
            if !c.is_whitespace() {
                self.unread(c);
                break;
            }
        }
        Ok(())
    }

    /// The diagnostic recorder fed by this source.
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Current diagnostic snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.recorder.snapshot()
    }

    /// Build an error carrying the current diagnostic snapshot.
    pub fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.snapshot())
    }

    fn next_byte(&mut self) -> Result<Option<u8>, LexError> {
        match self.bytes.next() {
            None => Ok(None),
            Some(Ok(byte)) => Ok(Some(byte)),
            Some(Err(err)) => Err(self.error(LexErrorKind::Io(err))),
        }
    }

    fn decode(&mut self, first: u8) -> Result<char, LexError> {
        let width = match first {
            0x00..=0x7F => return Ok(char::from(first)),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(self.error(LexErrorKind::InvalidUtf8)),
        };
        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.next_byte()? {
                Some(byte) => *slot = byte,
                None => return Err(self.error(LexErrorKind::UnexpectedEof)),
            }
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| self.error(LexErrorKind::InvalidUtf8))
    }
}
