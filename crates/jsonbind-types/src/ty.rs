//! Declared and resolved type expressions.

use std::fmt;

use crate::Value;

/// Built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
}

impl Scalar {
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::I8 => "i8",
            Scalar::I16 => "i16",
            Scalar::I32 => "i32",
            Scalar::I64 => "i64",
            Scalar::U8 => "u8",
            Scalar::U16 => "u16",
            Scalar::U32 => "u32",
            Scalar::U64 => "u64",
            Scalar::F32 => "f32",
            Scalar::F64 => "f64",
            Scalar::Char => "char",
            Scalar::String => "String",
        }
    }

    /// Whether a field of this kind holds a value even when never assigned.
    ///
    /// Fields of primitive kinds are non-nullable by default.
    pub fn is_primitive(self) -> bool {
        self != Scalar::String
    }

    /// The value a non-nullable field of this kind starts with.
    pub fn default_value(self) -> Value {
        match self {
            Scalar::Bool => Value::Bool(false),
            Scalar::I8 | Scalar::I16 | Scalar::I32 | Scalar::I64 => Value::Int(0),
            Scalar::U8 | Scalar::U16 | Scalar::U32 | Scalar::U64 => Value::UInt(0),
            Scalar::F32 | Scalar::F64 => Value::Float(0.0),
            Scalar::Char => Value::Char('\0'),
            Scalar::String => Value::Null,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw shape of a type, without type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar(Scalar),
    /// Fixed-size array; the component type is the single argument.
    Array,
    /// Ordered container; one argument.
    List,
    /// Associative container; key and value arguments.
    Map,
    /// A type registered under a qualified, dot-separated name.
    Named(String),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(scalar) => f.write_str(scalar.name()),
            Shape::Array => f.write_str("array"),
            Shape::List => f.write_str("List"),
            Shape::Map => f.write_str("Map"),
            Shape::Named(name) => f.write_str(name),
        }
    }
}

/// A declared type, as written on a field or superclass.
///
/// May mention type variables of the declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A formal type parameter, e.g. `T`.
    Var(String),
    /// An array of a possibly generic component, e.g. `T[]`.
    Array(Box<TypeRef>),
    /// A shape applied to zero or more arguments.
    Apply { shape: Shape, args: Vec<TypeRef> },
}

impl TypeRef {
    pub fn var(name: impl Into<String>) -> Self {
        TypeRef::Var(name.into())
    }

    pub fn scalar(scalar: Scalar) -> Self {
        TypeRef::Apply {
            shape: Shape::Scalar(scalar),
            args: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::scalar(Scalar::String)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Apply {
            shape: Shape::Named(name.into()),
            args,
        }
    }

    pub fn list(element: TypeRef) -> Self {
        TypeRef::Apply {
            shape: Shape::List,
            args: vec![element],
        }
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Apply {
            shape: Shape::Map,
            args: vec![key, value],
        }
    }

    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// Whether this type mentions no type variables.
    pub fn is_concrete(&self) -> bool {
        match self {
            TypeRef::Var(_) => false,
            TypeRef::Array(component) => component.is_concrete(),
            TypeRef::Apply { args, .. } => args.iter().all(TypeRef::is_concrete),
        }
    }

    /// The registered type name, if this applies a named shape.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            TypeRef::Apply {
                shape: Shape::Named(name),
                ..
            } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Var(name) => f.write_str(name),
            TypeRef::Array(component) => write!(f, "{}[]", component),
            TypeRef::Apply { shape, args } => write_applied(f, shape, args),
        }
    }
}

/// A fully concrete type: a shape plus resolved arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedType {
    pub shape: Shape,
    pub args: Vec<ResolvedType>,
}

impl ResolvedType {
    pub fn new(shape: Shape, args: Vec<ResolvedType>) -> Self {
        Self { shape, args }
    }

    pub fn scalar(scalar: Scalar) -> Self {
        Self::new(Shape::Scalar(scalar), Vec::new())
    }

    pub fn string() -> Self {
        Self::scalar(Scalar::String)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Shape::Named(name.into()), Vec::new())
    }

    pub fn generic(name: impl Into<String>, args: Vec<ResolvedType>) -> Self {
        Self::new(Shape::Named(name.into()), args)
    }

    pub fn list(element: ResolvedType) -> Self {
        Self::new(Shape::List, vec![element])
    }

    pub fn map(key: ResolvedType, value: ResolvedType) -> Self {
        Self::new(Shape::Map, vec![key, value])
    }

    pub fn array(component: ResolvedType) -> Self {
        Self::new(Shape::Array, vec![component])
    }

    /// The registered type name, for named shapes.
    pub fn type_name(&self) -> Option<&str> {
        match &self.shape {
            Shape::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The scalar kind, for built-in scalars.
    pub fn scalar_kind(&self) -> Option<Scalar> {
        match self.shape {
            Shape::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shape == Shape::Array
            && let [component] = self.args.as_slice()
        {
            return write!(f, "{}[]", component);
        }
        write_applied(f, &self.shape, &self.args)
    }
}

fn write_applied<T: fmt::Display>(f: &mut fmt::Formatter<'_>, shape: &Shape, args: &[T]) -> fmt::Result {
    write!(f, "{}", shape)?;
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", arg)?;
    }
    f.write_str(">")
}
