//! Serialize host values to JSON.

use std::borrow::Cow;
use std::io::Write;

use jsonbind_format::{JsonWriter, SerializeOptions};
use jsonbind_types::convert::format_scalar;
use jsonbind_types::{MapValue, ObjectRef, TypeError, TypeRegistry, Value};
use tracing::{debug, error, warn};

use crate::{Error, ErrorKind, Result, Warning};

/// Writes one value graph as compact JSON.
///
/// Objects are written with the fields their registered type declares.
/// An object met again while it is still being written is replaced by
/// `null`, so cyclic graphs always terminate. Acyclic graphs nested deeper
/// than the configured `max_depth` fail with [`ErrorKind::TooDeep`].
pub struct Serializer<'r, W: Write> {
    writer: JsonWriter<W>,
    registry: &'r TypeRegistry,
    options: SerializeOptions,
    /// Objects currently being written, outermost first.
    in_flight: Vec<ObjectRef>,
    warnings: Vec<Warning>,
}

impl<'r, W: Write> Serializer<'r, W> {
    pub fn new(out: W, registry: &'r TypeRegistry) -> Self {
        Self::with_options(out, registry, SerializeOptions::default())
    }

    pub fn with_options(out: W, registry: &'r TypeRegistry, options: SerializeOptions) -> Self {
        Self {
            writer: JsonWriter::new(out),
            registry,
            options,
            in_flight: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Write `value` and flush the output.
    ///
    /// Returns the warnings raised on the way.
    pub fn serialize(mut self, value: &Value) -> Result<Vec<Warning>> {
        self.write_value(value, true)?;
        self.writer.flush()?;
        Ok(self.warnings)
    }

    fn write_value(&mut self, value: &Value, root: bool) -> Result<()> {
        match value {
            Value::Null => self.writer.null()?,
            Value::Float(f) if !f.is_finite() => {
                let warning = Warning::NonFiniteNumber { value: *f };
                warn!("{}", warning);
                self.warnings.push(warning);
                self.writer.null()?;
            }
            Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_) => {
                let text = self.scalar_text(value);
                self.writer.raw(&text)?;
            }
            Value::Enum { type_name, .. } if self.registry.is_ordinal_enum(type_name) => {
                let text = self.scalar_text(value);
                self.writer.raw(&text)?;
            }
            Value::Array(items) | Value::List(items) => {
                self.check_depth()?;
                self.writer.begin_array()?;
                for item in items {
                    self.write_value(item, false)?;
                }
                self.writer.end_array()?;
            }
            Value::Char(_) | Value::Str(_) | Value::Enum { .. } | Value::Custom { .. } => {
                let text = self.scalar_text(value);
                self.writer.string(&text)?;
            }
            Value::Map(map) => {
                self.check_depth()?;
                self.write_map(map)?;
            }
            Value::Object(object) => {
                self.check_depth()?;
                self.write_object(object, root)?;
            }
        }
        Ok(())
    }

    fn check_depth(&self) -> Result<()> {
        if self.writer.depth() >= self.options.max_depth {
            return Err(Error::new(ErrorKind::TooDeep {
                max_depth: self.options.max_depth,
            }));
        }
        Ok(())
    }

    fn scalar_text<'v>(&self, value: &'v Value) -> Cow<'v, str> {
        format_scalar(value, self.registry).unwrap_or_default()
    }

    /// Keys go through the same rules as values, so they may be numbers or
    /// objects.
    fn write_map(&mut self, map: &MapValue) -> Result<()> {
        self.writer.begin_object()?;
        for (key, value) in map.iter() {
            self.write_value(key, false)?;
            self.write_value(value, false)?;
        }
        self.writer.end_object()?;
        Ok(())
    }

    fn write_object(&mut self, object: &ObjectRef, root: bool) -> Result<()> {
        if self.in_flight.iter().any(|o| o.ptr_eq(object)) {
            let warning = Warning::CircularReference {
                type_name: object.type_name(),
                chain: self.in_flight.iter().map(ObjectRef::type_name).collect(),
            };
            error!("{}", warning);
            self.warnings.push(warning);
            self.writer.null()?;
            return Ok(());
        }

        self.in_flight.push(object.clone());
        let result = self.write_fields(object, root);
        self.in_flight.pop();
        result
    }

    fn write_fields(&mut self, object: &ObjectRef, root: bool) -> Result<()> {
        let registry = self.registry;
        let object = object.borrow();
        self.writer.begin_object()?;

        if root && self.options.type_tag {
            self.writer.string(&self.options.type_tag_key)?;
            self.writer.string(object.type_name())?;
        }

        match registry.serializable_fields(object.type_name()) {
            Ok(fields) => {
                for field in fields {
                    self.writer.string(&field.name)?;
                    self.write_value(object.get(&field.name).unwrap_or(&Value::Null), false)?;
                }
            }
            Err(TypeError::UnknownType { name }) => {
                debug!("Type {} is not registered, writing stored fields", name);
                for (name, value) in object.fields() {
                    self.writer.string(name)?;
                    self.write_value(value, false)?;
                }
            }
            Err(err) => return Err(err.into()),
        }

        self.writer.end_object()?;
        Ok(())
    }
}
