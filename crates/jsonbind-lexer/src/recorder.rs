//! Ring buffer of recently consumed characters.

use std::fmt;

/// Number of characters kept for error samples.
pub const CAPACITY: usize = 64;

/// Records the most recent [`CAPACITY`] characters read from the input,
/// together with the total number of characters seen.
#[derive(Debug, Clone)]
pub struct Recorder {
    buffer: [char; CAPACITY],
    count: usize,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            buffer: ['\0'; CAPACITY],
            count: 0,
        }
    }

    /// Append one character.
    #[inline]
    pub fn record(&mut self, c: char) {
        self.buffer[self.count % CAPACITY] = c;
        self.count += 1;
    }

    /// Total number of characters recorded.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Zero-based index of the last recorded character.
    pub fn char_index(&self) -> Option<usize> {
        self.count.checked_sub(1)
    }

    /// The recorded characters, oldest first.
    pub fn sample(&self) -> String {
        if self.count <= CAPACITY {
            return self.buffer[..self.count].iter().collect();
        }
        let start = self.count % CAPACITY;
        self.buffer[start..]
            .iter()
            .chain(&self.buffer[..start])
            .collect()
    }

    /// Capture the current position and sample for an error message.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            char_index: self.char_index(),
            sample: self.sample(),
        }
    }
}

/// Point-in-time copy of a [`Recorder`], attached to errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Index of the last character consumed before the error, if any.
    pub char_index: Option<usize>,
    /// Up to [`CAPACITY`] characters preceding (and including) that position.
    pub sample: String,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.char_index {
            Some(index) => write!(f, "char #{} near {:?}", index, self.sample),
            None => write!(f, "start of input"),
        }
    }
}
