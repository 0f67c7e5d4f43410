//! Construction targets driven by the parser.
//!
//! Each nested region of the input is built into one [`Sink`], chosen by
//! classifying the region's resolved type. The parser feeds the sink text
//! tokens and finished nested values; the sink converts and stores them.

use jsonbind_types::convert::parse_scalar;
use jsonbind_types::{Category, MapValue, ObjectRef, ResolvedType, TypeRegistry, Value};
use tracing::debug;

use crate::{Error, Result, Warning};

/// One value handed to a sink.
#[derive(Debug, Clone)]
pub(crate) enum Input {
    /// Unconverted token text.
    Text(String),
    /// The bare literal `null`.
    Null,
    /// A value already built by a nested sink.
    Built(Value),
}

impl Input {
    /// Input for a text token's payload; `None` is the `null` literal.
    pub(crate) fn from_text(text: Option<String>) -> Self {
        match text {
            Some(text) => Input::Text(text),
            None => Input::Null,
        }
    }

    fn convert(self, ty: &ResolvedType, registry: &TypeRegistry) -> Result<Value> {
        match self {
            Input::Text(text) => Ok(parse_scalar(&text, ty, registry)?),
            Input::Null => Ok(Value::Null),
            Input::Built(value) => Ok(value),
        }
    }
}

/// Current field of an object sink.
#[derive(Debug)]
struct FieldTarget {
    name: String,
    ty: ResolvedType,
    nullable: bool,
}

#[derive(Debug)]
pub(crate) struct ObjectSink {
    ty: ResolvedType,
    object: ObjectRef,
    /// `None` while the current property has no matching field.
    field: Option<FieldTarget>,
}

#[derive(Debug)]
pub(crate) struct ArraySink {
    element: ResolvedType,
    pending: Vec<Input>,
    built: Option<Vec<Value>>,
}

#[derive(Debug)]
pub(crate) struct MapSink {
    key: ResolvedType,
    value: ResolvedType,
    entries: MapValue,
    pending_key: Option<Input>,
}

/// Target of one value or nested region.
#[derive(Debug)]
pub(crate) enum Sink {
    /// A single scalar-like value.
    Scalar {
        ty: ResolvedType,
        value: Option<Value>,
    },
    Object(ObjectSink),
    Array(ArraySink),
    List {
        element: ResolvedType,
        items: Vec<Value>,
    },
    Map(MapSink),
    /// Drops everything; used for properties the target type lacks.
    Discard,
}

impl Sink {
    /// Select the sink for `ty`; `None` selects [`Sink::Discard`].
    ///
    /// Fails when the type cannot be built at all, before any input for the
    /// value is consumed.
    pub(crate) fn for_type(ty: Option<&ResolvedType>, registry: &TypeRegistry) -> Result<Self> {
        let Some(ty) = ty else {
            debug!("Selected discard sink");
            return Ok(Sink::Discard);
        };
        let sink = match registry.classify(ty)? {
            Category::ScalarLike => Sink::Scalar {
                ty: ty.clone(),
                value: None,
            },
            Category::ArrayLike => Sink::Array(ArraySink {
                element: single_arg(ty)?.clone(),
                pending: Vec::new(),
                built: None,
            }),
            Category::Ordered => Sink::List {
                element: single_arg(ty)?.clone(),
                items: Vec::new(),
            },
            Category::Associative => {
                let [key, value] = ty.args.as_slice() else {
                    return Err(Error::unsupported(format!(
                        "associative type '{}' requires key and value type arguments",
                        ty
                    )));
                };
                Sink::Map(MapSink {
                    key: key.clone(),
                    value: value.clone(),
                    entries: MapValue::new(),
                    pending_key: None,
                })
            }
            Category::Structured => match registry.instantiate(ty)? {
                Value::Object(object) => Sink::Object(ObjectSink {
                    ty: ty.clone(),
                    object,
                    field: None,
                }),
                other => {
                    return Err(Error::unsupported(format!(
                        "'{}' instantiates to a {}, not an object",
                        ty,
                        other.kind_name()
                    )));
                }
            },
        };
        debug!("Selected {} sink for {}", sink.kind_name(), ty);
        Ok(sink)
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Sink::Scalar { .. } => "scalar",
            Sink::Object(_) => "object",
            Sink::Array(_) => "array",
            Sink::List { .. } => "list",
            Sink::Map(_) => "map",
            Sink::Discard => "discard",
        }
    }

    /// Whether an `{ ... }` region can fill this sink.
    pub(crate) fn accepts_object(&self) -> bool {
        matches!(self, Sink::Object(_) | Sink::Map(_) | Sink::Discard)
    }

    /// Whether a `[ ... ]` region can fill this sink.
    pub(crate) fn accepts_array(&self) -> bool {
        matches!(self, Sink::Array(_) | Sink::List { .. } | Sink::Discard)
    }

    /// Whether a bare or quoted scalar can fill this sink.
    pub(crate) fn accepts_text(&self) -> bool {
        matches!(self, Sink::Scalar { .. } | Sink::Discard)
    }

    pub(crate) fn is_map(&self) -> bool {
        matches!(self, Sink::Map(_))
    }

    /// The type expected for the next accepted value. `None` means the value
    /// is discarded.
    pub(crate) fn element_type(&self) -> Option<&ResolvedType> {
        match self {
            Sink::Scalar { ty, .. } => Some(ty),
            Sink::Object(sink) => sink.field.as_ref().map(|field| &field.ty),
            Sink::Array(sink) => Some(&sink.element),
            Sink::List { element, .. } => Some(element),
            Sink::Map(sink) => Some(&sink.value),
            Sink::Discard => None,
        }
    }

    /// The type of map keys.
    pub(crate) fn key_type(&self) -> Option<&ResolvedType> {
        match self {
            Sink::Map(sink) => Some(&sink.key),
            _ => None,
        }
    }

    /// Select the field the next value is assigned to.
    ///
    /// A name with no matching field is not an error: the value that follows
    /// is dropped and a warning is returned.
    pub(crate) fn set_field(
        &mut self,
        wire_name: &str,
        registry: &TypeRegistry,
    ) -> Result<Option<Warning>> {
        let Sink::Object(sink) = self else {
            return Ok(None);
        };
        match registry.find_field(&sink.ty, wire_name)? {
            Some(found) => {
                debug!(
                    "Field '{}' of {} resolves to {}",
                    found.field.name, found.declaring.name, found.ty
                );
                sink.field = Some(FieldTarget {
                    name: found.field.name.clone(),
                    ty: found.ty,
                    nullable: found.field.nullable,
                });
                Ok(None)
            }
            None => {
                sink.field = None;
                Ok(Some(Warning::MissingField {
                    type_name: sink.ty.to_string(),
                    field: wire_name.to_string(),
                }))
            }
        }
    }

    /// Remember the key for the next map entry; it is converted when the
    /// entry's value arrives.
    pub(crate) fn set_key(&mut self, key: Input) {
        if let Sink::Map(sink) = self {
            sink.pending_key = Some(key);
        }
    }

    /// Accept one value.
    pub(crate) fn accept(
        &mut self,
        input: Input,
        registry: &TypeRegistry,
    ) -> Result<Option<Warning>> {
        match self {
            Sink::Scalar { ty, value } => {
                if value.is_none() {
                    *value = Some(input.convert(ty, registry)?);
                }
            }
            Sink::Object(sink) => return sink.accept(input, registry),
            Sink::Array(sink) => {
                sink.built = None;
                sink.pending.push(input);
            }
            Sink::List { element, items } => items.push(input.convert(element, registry)?),
            Sink::Map(sink) => {
                let key = match sink.pending_key.take() {
                    Some(key) => key.convert(&sink.key, registry)?,
                    None => return Err(Error::syntax("map value without a key")),
                };
                let value = input.convert(&sink.value, registry)?;
                sink.entries.insert(key, value);
            }
            Sink::Discard => {}
        }
        Ok(None)
    }

    /// The value built so far.
    ///
    /// An array sink converts its pending items on the first call and
    /// reuses the result afterwards.
    pub(crate) fn instance(&mut self, registry: &TypeRegistry) -> Result<Value> {
        Ok(match self {
            Sink::Scalar { value, .. } => value.clone().unwrap_or(Value::Null),
            Sink::Object(sink) => Value::Object(sink.object.clone()),
            Sink::Array(sink) => Value::Array(sink.materialize(registry)?.to_vec()),
            Sink::List { items, .. } => Value::List(items.clone()),
            Sink::Map(sink) => Value::Map(sink.entries.clone()),
            Sink::Discard => Value::Null,
        })
    }
}

impl ObjectSink {
    fn accept(&mut self, input: Input, registry: &TypeRegistry) -> Result<Option<Warning>> {
        let Some(field) = &self.field else {
            return Ok(None);
        };
        if matches!(input, Input::Null) && !field.nullable {
            return Ok(Some(Warning::NullIntoNonNullable {
                type_name: self.ty.to_string(),
                field: field.name.clone(),
            }));
        }
        let value = input.convert(&field.ty, registry)?;
        self.object.set(field.name.clone(), value);
        Ok(None)
    }
}

impl ArraySink {
    fn materialize(&mut self, registry: &TypeRegistry) -> Result<&[Value]> {
        if self.built.is_none() {
            let items = self
                .pending
                .iter()
                .cloned()
                .map(|input| input.convert(&self.element, registry))
                .collect::<Result<Vec<_>>>()?;
            self.built = Some(items);
        }
        Ok(self.built.as_deref().unwrap_or_default())
    }
}

fn single_arg(ty: &ResolvedType) -> Result<&ResolvedType> {
    match ty.args.as_slice() {
        [arg] => Ok(arg),
        args => Err(Error::unsupported(format!(
            "'{}' requires exactly one type argument but got {}",
            ty,
            args.len()
        ))),
    }
}
