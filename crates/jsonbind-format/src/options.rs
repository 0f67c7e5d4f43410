//! Options for JSON serialization.

/// Property name carrying the concrete type of a tagged object.
pub const DEFAULT_TYPE_TAG_KEY: &str = "class";

/// Default limit on nested arrays, lists, maps and objects.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for JSON serialization.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Write the root object's qualified type name as its first property
    /// (default: false)
    pub type_tag: bool,

    /// Name of the type tag property (default: "class")
    pub type_tag_key: String,

    /// Maximum nesting of containers and objects (default: 128)
    pub max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            type_tag: false,
            type_tag_key: DEFAULT_TYPE_TAG_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SerializeOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the root object with its type name.
    pub fn tagged(mut self) -> Self {
        self.type_tag = true;
        self
    }

    /// Use a custom type tag property name.
    pub fn type_tag_key(mut self, key: impl Into<String>) -> Self {
        self.type_tag_key = key.into();
        self
    }

    /// Fail instead of writing values nested deeper than `max_depth`.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
