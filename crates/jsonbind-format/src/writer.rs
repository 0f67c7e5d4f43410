//! Low-level JSON output writer.
//!
//! Tracks separators so callers only announce values: commas between
//! elements and the colon after an object key are written automatically.
//! Any value may be used as an object key, which lets maps with non-string
//! keys be written with the same calls as their values.

use std::io::{self, Write};

use tracing::trace;

use crate::scalar::escape_string;

/// Which half of an object entry comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Key,
    Value,
}

/// Context for tracking output state.
#[derive(Debug, Clone)]
enum Context {
    /// Inside an object - tracks if we've written any entries
    Object { first: bool, slot: Slot },
    /// Inside an array - tracks if we've written any items
    Array { first: bool },
}

/// Compact JSON writer over any [`Write`].
pub struct JsonWriter<W> {
    out: W,
    stack: Vec<Context>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stack: Vec::new(),
        }
    }

    /// Number of arrays and objects currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn begin_object(&mut self) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(b"{")?;
        self.stack.push(Context::Object {
            first: true,
            slot: Slot::Key,
        });
        trace!("Begin object at depth {}", self.depth());
        Ok(())
    }

    pub fn end_object(&mut self) -> io::Result<()> {
        match self.stack.pop() {
            Some(Context::Object {
                slot: Slot::Key, ..
            }) => {}
            Some(Context::Object { .. }) => {
                return Err(invalid("object closed after a key without a value"));
            }
            _ => return Err(invalid("end_object without a matching begin_object")),
        }
        self.out.write_all(b"}")?;
        self.after_value()
    }

    pub fn begin_array(&mut self) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(b"[")?;
        self.stack.push(Context::Array { first: true });
        trace!("Begin array at depth {}", self.depth());
        Ok(())
    }

    pub fn end_array(&mut self) -> io::Result<()> {
        if !matches!(self.stack.pop(), Some(Context::Array { .. })) {
            return Err(invalid("end_array without a matching begin_array"));
        }
        self.out.write_all(b"]")?;
        self.after_value()
    }

    pub fn null(&mut self) -> io::Result<()> {
        self.raw("null")
    }

    /// Write unquoted text, such as a number or boolean.
    pub fn raw(&mut self, text: &str) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(text.as_bytes())?;
        self.after_value()
    }

    /// Write a quoted, escaped string.
    pub fn string(&mut self, s: &str) -> io::Result<()> {
        self.before_value()?;
        self.out.write_all(b"\"")?;
        self.out.write_all(escape_string(s).as_bytes())?;
        self.out.write_all(b"\"")?;
        self.after_value()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn before_value(&mut self) -> io::Result<()> {
        let comma = match self.stack.last_mut() {
            Some(Context::Array { first }) => !std::mem::replace(first, false),
            Some(Context::Object {
                first,
                slot: Slot::Key,
            }) => !std::mem::replace(first, false),
            _ => false,
        };
        if comma {
            self.out.write_all(b",")?;
        }
        Ok(())
    }

    fn after_value(&mut self) -> io::Result<()> {
        let mut colon = false;
        if let Some(Context::Object { slot, .. }) = self.stack.last_mut() {
            *slot = match slot {
                Slot::Key => {
                    colon = true;
                    Slot::Value
                }
                Slot::Value => Slot::Key,
            };
        }
        if colon {
            self.out.write_all(b":")?;
        }
        Ok(())
    }
}

fn invalid(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.to_string())
}
