//! Low-level JSON output for jsonbind.
//!
//! String escaping and a comma-tracking writer, independent of the value
//! model that drives them.

mod options;
mod scalar;
mod writer;

pub use options::{DEFAULT_MAX_DEPTH, DEFAULT_TYPE_TAG_KEY, SerializeOptions};
pub use scalar::escape_string;
pub use writer::JsonWriter;
