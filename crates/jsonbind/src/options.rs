//! Options for parsing.

use jsonbind_format::{DEFAULT_MAX_DEPTH, DEFAULT_TYPE_TAG_KEY};

/// How much the parser tolerates beyond standard JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Accept bare unquoted tokens, trailing commas, an empty arguments
    /// stream and surplus arguments.
    #[default]
    Relaxed,
    /// Standard JSON, plus non-string map keys and the type tag.
    Strict,
}

/// Options for parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Relaxed or strict input (default: relaxed)
    pub mode: Mode,

    /// Name of the type tag property read in tagged mode (default: "class")
    pub type_tag_key: String,

    /// Maximum nesting of `{` and `[` regions (default: 128)
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Relaxed,
            type_tag_key: DEFAULT_TYPE_TAG_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept standard JSON.
    pub fn strict(mut self) -> Self {
        self.mode = Mode::Strict;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Use a custom type tag property name.
    pub fn type_tag_key(mut self, key: impl Into<String>) -> Self {
        self.type_tag_key = key.into();
        self
    }

    /// Fail on input nested deeper than `max_depth`.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn is_strict(&self) -> bool {
        self.mode == Mode::Strict
    }
}
