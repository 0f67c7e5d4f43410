//! Registry of named types and the introspection built on it.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::{
    EnumDescriptor, FieldDescriptor, ObjectRef, ResolvedType, ScalarCodec, Scope, Shape,
    StructDescriptor, TypeDef, TypeError, TypeRef, Value, resolve,
};

/// How a value of a type is built and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ArrayLike,
    Ordered,
    Associative,
    /// Built-in scalars, enumerations and custom scalars.
    ScalarLike,
    Structured,
}

/// A field found by [`TypeRegistry::find_field`].
#[derive(Debug, Clone)]
pub struct FieldMatch<'a> {
    pub field: &'a FieldDescriptor,
    /// The type in the hierarchy that declares the field.
    pub declaring: &'a StructDescriptor,
    /// The field's type, resolved against the declaring type's instantiation.
    pub ty: ResolvedType,
}

/// Named types known to the parser and serializer.
///
/// Registration happens up front; afterwards the registry is only read and
/// can be shared between threads.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: TypeDef) -> &mut Self {
        debug!("Registered type {}", def.name());
        self.types.insert(def.name().to_string(), def);
        self
    }

    pub fn register_struct(&mut self, desc: StructDescriptor) -> &mut Self {
        self.register(TypeDef::Struct(desc))
    }

    pub fn register_enum(&mut self, desc: EnumDescriptor) -> &mut Self {
        self.register(TypeDef::Enum(desc))
    }

    pub fn register_custom(
        &mut self,
        name: impl Into<String>,
        codec: impl ScalarCodec + 'static,
    ) -> &mut Self {
        self.register(TypeDef::Custom {
            name: name.into(),
            codec: Box::new(codec),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn struct_def(&self, name: &str) -> Result<&StructDescriptor, TypeError> {
        match self.lookup(name) {
            Some(TypeDef::Struct(desc)) => Ok(desc),
            Some(_) => Err(TypeError::NotStructured {
                name: name.to_string(),
            }),
            None => Err(TypeError::UnknownType {
                name: name.to_string(),
            }),
        }
    }

    pub fn enum_def(&self, name: &str) -> Option<&EnumDescriptor> {
        match self.lookup(name) {
            Some(TypeDef::Enum(desc)) => Some(desc),
            _ => None,
        }
    }

    /// Whether `name` is an enumeration written as its ordinal.
    pub fn is_ordinal_enum(&self, name: &str) -> bool {
        self.enum_def(name).is_some_and(|desc| desc.ordinal)
    }

    pub fn classify(&self, ty: &ResolvedType) -> Result<Category, TypeError> {
        Ok(match &ty.shape {
            Shape::Array => Category::ArrayLike,
            Shape::List => Category::Ordered,
            Shape::Map => Category::Associative,
            Shape::Scalar(_) => Category::ScalarLike,
            Shape::Named(name) => match self.lookup(name) {
                Some(TypeDef::Struct(_)) => Category::Structured,
                Some(TypeDef::Enum(_) | TypeDef::Custom { .. }) => Category::ScalarLike,
                None => {
                    return Err(TypeError::UnknownType { name: name.clone() });
                }
            },
        })
    }

    /// Default instance of `ty`.
    ///
    /// Containers are empty; structured objects get every instance field of
    /// their hierarchy, primitive fields at their zero value and the rest
    /// `null`. Raw containers and raw generic structured types are rejected.
    pub fn instantiate(&self, ty: &ResolvedType) -> Result<Value, TypeError> {
        match &ty.shape {
            Shape::Array => {
                expect_args(ty, 1, "array")?;
                Ok(Value::Array(Vec::new()))
            }
            Shape::List => {
                expect_args(ty, 1, "ordered container")?;
                Ok(Value::List(Vec::new()))
            }
            Shape::Map => {
                expect_args(ty, 2, "associative container")?;
                Ok(Value::Map(Default::default()))
            }
            Shape::Scalar(scalar) => Ok(scalar.default_value()),
            Shape::Named(name) => match self.lookup(name) {
                Some(TypeDef::Struct(_)) => self.instantiate_struct(ty).map(Value::Object),
                Some(_) => Ok(Value::Null),
                None => Err(TypeError::UnknownType { name: name.clone() }),
            },
        }
    }

    fn instantiate_struct(&self, ty: &ResolvedType) -> Result<ObjectRef, TypeError> {
        let levels = self.hierarchy(ty)?;
        let object = ObjectRef::new(&levels[0].0.name);
        for (desc, _) in &levels {
            for field in desc.fields.iter().filter(|f| f.is_instance()) {
                if object.borrow().contains(&field.name) {
                    continue;
                }
                object.set(field.name.clone(), default_for(field));
            }
        }
        Ok(object)
    }

    /// `ty` followed by each superclass, every level with its instantiation.
    pub fn hierarchy(
        &self,
        ty: &ResolvedType,
    ) -> Result<Vec<(&StructDescriptor, ResolvedType)>, TypeError> {
        let mut levels: Vec<(&StructDescriptor, ResolvedType)> = Vec::new();
        let mut current = ty.clone();
        loop {
            let name = current.type_name().ok_or_else(|| TypeError::UnsupportedShape {
                message: format!("'{}' is not a structured type", current),
            })?;
            let desc = self.struct_def(name)?;
            check_generic_args(desc, &current)?;
            if levels.iter().any(|(seen, _)| seen.name == desc.name) {
                return Err(TypeError::UnsupportedShape {
                    message: format!("cyclic inheritance through '{}'", desc.name),
                });
            }
            let next = match &desc.superclass {
                Some(superclass) => Some(resolve(superclass, &Scope::new(desc, &current))?),
                None => None,
            };
            levels.push((desc, current));
            match next {
                Some(next) => current = next,
                None => return Ok(levels),
            }
        }
    }

    /// Find the field a wire name refers to.
    ///
    /// Tries the exact name, then its member form (`error-codes` becomes
    /// `errorCodes`), on `ty` and then up the superclass chain.
    pub fn find_field(
        &self,
        ty: &ResolvedType,
        wire_name: &str,
    ) -> Result<Option<FieldMatch<'_>>, TypeError> {
        let member = member_name(wire_name);
        for (desc, inst) in self.hierarchy(ty)? {
            let found = desc
                .fields
                .iter()
                .filter(|f| f.is_instance())
                .find(|f| f.name == wire_name || f.name == member);
            if let Some(field) = found {
                let resolved = resolve(&field.ty, &Scope::new(desc, &inst))?;
                return Ok(Some(FieldMatch {
                    field,
                    declaring: desc,
                    ty: resolved,
                }));
            }
        }
        Ok(None)
    }

    /// Fields written for an object of type `name`, in order: its own
    /// fields, then each superclass's while the superclass is in the same
    /// module. Transient and type-level fields are left out.
    ///
    /// Fails on cyclic inheritance, as [`TypeRegistry::hierarchy`] does.
    pub fn serializable_fields(&self, name: &str) -> Result<Vec<&FieldDescriptor>, TypeError> {
        let mut desc = self.struct_def(name)?;
        let module = desc.module();
        let mut visited = vec![desc.name.as_str()];
        let mut fields = Vec::new();
        loop {
            fields.extend(
                desc.fields
                    .iter()
                    .filter(|f| f.is_instance() && !f.transient),
            );
            let Some(superclass) = desc.superclass.as_ref().and_then(TypeRef::type_name) else {
                return Ok(fields);
            };
            let next = self.struct_def(superclass)?;
            if next.module() != module {
                return Ok(fields);
            }
            if visited.contains(&next.name.as_str()) {
                return Err(TypeError::UnsupportedShape {
                    message: format!("cyclic inheritance through '{}'", next.name),
                });
            }
            visited.push(next.name.as_str());
            desc = next;
        }
    }
}

fn expect_args(ty: &ResolvedType, count: usize, what: &str) -> Result<(), TypeError> {
    if ty.args.len() == count {
        return Ok(());
    }
    Err(TypeError::UnsupportedShape {
        message: format!(
            "{} type requires {} type argument(s) but got {}",
            what,
            count,
            ty.args.len()
        ),
    })
}

fn check_generic_args(desc: &StructDescriptor, ty: &ResolvedType) -> Result<(), TypeError> {
    if desc.type_params.len() == ty.args.len() {
        return Ok(());
    }
    if ty.args.is_empty() {
        return Err(TypeError::UnsupportedShape {
            message: format!(
                "generic type '{}' requires a concrete instantiation",
                desc.name
            ),
        });
    }
    Err(TypeError::ArityMismatch {
        owner: desc.name.clone(),
        expected: desc.type_params.len(),
        actual: ty.args.len(),
    })
}

fn default_for(field: &FieldDescriptor) -> Value {
    match &field.ty {
        TypeRef::Apply {
            shape: Shape::Scalar(scalar),
            ..
        } if !field.nullable => scalar.default_value(),
        _ => Value::Null,
    }
}

/// Member form of a wire name: dash-separated words joined in camel case.
pub fn member_name(wire_name: &str) -> Cow<'_, str> {
    if !wire_name.contains('-') {
        return Cow::Borrowed(wire_name);
    }
    let mut out = String::with_capacity(wire_name.len());
    for (i, word) in wire_name.split('-').filter(|w| !w.is_empty()).enumerate() {
        let mut chars = word.chars();
        if i > 0
            && let Some(first) = chars.next()
        {
            out.extend(first.to_uppercase());
        }
        out.push_str(chars.as_str());
    }
    Cow::Owned(out)
}
