//! Type model for jsonbind.
//!
//! Structured types are described explicitly with [`StructDescriptor`] and
//! registered in a [`TypeRegistry`]. Declared field types ([`TypeRef`]) may
//! mention the formal type parameters of their declaring type; [`resolve`]
//! substitutes them against a concrete instantiation to produce a
//! [`ResolvedType`]. Parsed data lives in the dynamic [`Value`] graph.

mod error;
pub use error::{ConvertError, TypeError};

mod ty;
pub use ty::{ResolvedType, Scalar, Shape, TypeRef};

mod descriptor;
pub use descriptor::{EnumDescriptor, FieldDescriptor, ScalarCodec, StructDescriptor, TypeDef};

mod resolve;
pub use resolve::{Scope, resolve};

mod registry;
pub use registry::{Category, FieldMatch, TypeRegistry, member_name};

mod value;
pub use value::{MapValue, Object, ObjectRef, Value};

pub mod convert;
