//! Descriptors for registered types.

use std::fmt;

use crate::{Shape, TypeRef};

/// One field of a structured type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
    /// Whether `null` may be stored. Primitive scalar fields are not nullable
    /// unless [`nullable`](Self::nullable) is called.
    pub nullable: bool,
    /// Skipped by the serializer.
    pub transient: bool,
    /// Belongs to the type rather than to instances; never read or written.
    pub type_level: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        let primitive = matches!(
            &ty,
            TypeRef::Apply { shape: Shape::Scalar(scalar), .. } if scalar.is_primitive()
        );
        Self {
            name: name.into(),
            ty,
            nullable: !primitive,
            transient: false,
            type_level: false,
        }
    }

    /// Allow `null` in a primitive field (a boxed primitive).
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn type_level(mut self) -> Self {
        self.type_level = true;
        self
    }

    /// Whether this field is an instance field.
    pub fn is_instance(&self) -> bool {
        !self.type_level
    }
}

/// A structured type: ordered fields, optional type parameters and an
/// optional superclass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    /// Qualified name, e.g. `app.model.Person`.
    pub name: String,
    pub type_params: Vec<String>,
    /// May mention this type's own parameters, e.g. `app.Base<T>`.
    pub superclass: Option<TypeRef>,
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            superclass: None,
            fields: Vec::new(),
        }
    }

    pub fn type_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn extends(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Namespace part of the name: everything before the last dot.
    pub fn module(&self) -> &str {
        self.name.rsplit_once('.').map_or("", |(module, _)| module)
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// An enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub constants: Vec<String>,
    /// Written and read as the numeric ordinal instead of the constant name.
    pub ordinal: bool,
}

impl EnumDescriptor {
    pub fn new<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
            ordinal: false,
        }
    }

    pub fn ordinal(mut self) -> Self {
        self.ordinal = true;
        self
    }

    pub fn position(&self, constant: &str) -> Option<usize> {
        self.constants.iter().position(|c| c == constant)
    }
}

/// Text conversion for a custom scalar type.
pub trait ScalarCodec: Send + Sync {
    /// Validate and normalize wire text. `None` rejects it.
    fn parse(&self, text: &str) -> Option<String>;
}

impl<F> ScalarCodec for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn parse(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// A registered type.
pub enum TypeDef {
    Struct(StructDescriptor),
    Enum(EnumDescriptor),
    /// A type with a native string form, such as a URL or a date.
    Custom {
        name: String,
        codec: Box<dyn ScalarCodec>,
    },
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Struct(desc) => &desc.name,
            TypeDef::Enum(desc) => &desc.name,
            TypeDef::Custom { name, .. } => name,
        }
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDef::Struct(desc) => f.debug_tuple("Struct").field(desc).finish(),
            TypeDef::Enum(desc) => f.debug_tuple("Enum").field(desc).finish(),
            TypeDef::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}
