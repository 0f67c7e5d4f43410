//! Bind relaxed JSON to registered host types.
//!
//! Types are described up front in a [`TypeRegistry`]. Parsing builds a
//! [`Value`] graph of a requested [`ResolvedType`], resolving generic field
//! types against the instantiation at every level. Serialization walks any
//! value graph back to JSON and tolerates cycles.
//!
//! ```
//! use jsonbind::{FieldDescriptor, ResolvedType, Scalar, StructDescriptor, TypeRef, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_struct(
//!     StructDescriptor::new("app.Person")
//!         .field(FieldDescriptor::new("name", TypeRef::string()))
//!         .field(FieldDescriptor::new("age", TypeRef::scalar(Scalar::I32))),
//! );
//!
//! let person = jsonbind::from_str(
//!     r#"{"name":"John Doe","age":50}"#,
//!     &ResolvedType::named("app.Person"),
//!     &registry,
//! )
//! .unwrap();
//! assert_eq!(person.get("age").and_then(|age| age.as_i64()), Some(50));
//!
//! let json = jsonbind::to_string(&person, &registry).unwrap();
//! assert_eq!(json, r#"{"name":"John Doe","age":50}"#);
//! ```

use std::io::{Read, Write};

mod error;
mod options;
mod parser;
mod serializer;
mod sink;
mod warning;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use options::{Mode, ParseOptions};
pub use parser::{Parsed, Parser};
pub use serializer::Serializer;
pub use warning::Warning;

pub use jsonbind_format::{DEFAULT_TYPE_TAG_KEY, SerializeOptions};
pub use jsonbind_types::{
    Category, EnumDescriptor, FieldDescriptor, MapValue, Object, ObjectRef, ResolvedType, Scalar,
    ScalarCodec, Shape, StructDescriptor, TypeDef, TypeError, TypeRef, TypeRegistry, Value,
};

/// Parse a value of type `ty` from a string.
pub fn from_str(text: &str, ty: &ResolvedType, registry: &TypeRegistry) -> Result<Value> {
    from_reader(text.as_bytes(), ty, registry)
}

/// Parse a value of type `ty` from a reader.
pub fn from_reader<R: Read>(reader: R, ty: &ResolvedType, registry: &TypeRegistry) -> Result<Value> {
    Ok(Parser::new(reader, registry).parse(ty)?.value)
}

/// Parse an object whose concrete type is named by its leading type tag.
pub fn from_str_tagged(text: &str, registry: &TypeRegistry) -> Result<Value> {
    from_reader_tagged(text.as_bytes(), registry)
}

pub fn from_reader_tagged<R: Read>(reader: R, registry: &TypeRegistry) -> Result<Value> {
    Ok(Parser::new(reader, registry).parse_tagged()?.value)
}

/// Parse an array of values, one per requested type.
pub fn from_str_args(
    text: &str,
    types: &[ResolvedType],
    registry: &TypeRegistry,
) -> Result<Vec<Value>> {
    from_reader_args(text.as_bytes(), types, registry)
}

pub fn from_reader_args<R: Read>(
    reader: R,
    types: &[ResolvedType],
    registry: &TypeRegistry,
) -> Result<Vec<Value>> {
    Ok(Parser::new(reader, registry).parse_arguments(types)?.value)
}

/// Serialize a value to a JSON string.
pub fn to_string(value: &Value, registry: &TypeRegistry) -> Result<String> {
    to_string_with_options(value, registry, SerializeOptions::default())
}

/// Serialize a value, tagging a root object with its type name.
pub fn to_string_tagged(value: &Value, registry: &TypeRegistry) -> Result<String> {
    to_string_with_options(value, registry, SerializeOptions::new().tagged())
}

fn to_string_with_options(
    value: &Value,
    registry: &TypeRegistry,
    options: SerializeOptions,
) -> Result<String> {
    let mut out = Vec::new();
    to_writer_with_options(&mut out, value, registry, options)?;
    String::from_utf8(out).map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
}

/// Serialize a value to a writer. The writer is flushed, not closed.
pub fn to_writer<W: Write>(writer: W, value: &Value, registry: &TypeRegistry) -> Result<()> {
    to_writer_with_options(writer, value, registry, SerializeOptions::default())
}

pub fn to_writer_with_options<W: Write>(
    writer: W,
    value: &Value,
    registry: &TypeRegistry,
    options: SerializeOptions,
) -> Result<()> {
    Serializer::with_options(writer, registry, options).serialize(value)?;
    Ok(())
}
