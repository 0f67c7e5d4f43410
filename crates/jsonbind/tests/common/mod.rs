#![allow(dead_code)]

use jsonbind::{
    EnumDescriptor, FieldDescriptor, ResolvedType, Scalar, StructDescriptor, TypeRef, TypeRegistry,
};

pub const PERSON: &str = "app.model.Person";
pub const MEMBER: &str = "app.model.Member";
pub const MANAGER: &str = "app.model.Manager";
pub const DEPARTMENT: &str = "app.model.Department";
pub const POINT: &str = "app.model.Point";
pub const ACCOUNT: &str = "app.model.Account";
pub const STATE: &str = "app.model.State";
pub const LEVEL: &str = "app.model.Level";
pub const URL: &str = "app.net.Url";
pub const AUDITED: &str = "lib.audit.Audited";
pub const RESPONSE: &str = "app.generic.Response";
pub const PAGE: &str = "app.generic.Page";
pub const DICTIONARY: &str = "app.generic.Dictionary";
pub const GRID: &str = "app.generic.Grid";
pub const NODE: &str = "app.graph.Node";
pub const SELFISH: &str = "app.graph.Selfish";

pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register_struct(
            StructDescriptor::new(PERSON)
                .field(FieldDescriptor::new("name", TypeRef::string()))
                .field(FieldDescriptor::new("age", TypeRef::scalar(Scalar::I32))),
        )
        .register_struct(
            StructDescriptor::new(MEMBER)
                .field(FieldDescriptor::new("name", TypeRef::string()))
                .field(FieldDescriptor::new("state", TypeRef::named(STATE))),
        )
        .register_struct(
            StructDescriptor::new(MANAGER)
                .extends(TypeRef::named(PERSON))
                .field(FieldDescriptor::new(
                    "reports",
                    TypeRef::list(TypeRef::named(PERSON)),
                )),
        )
        .register_struct(
            StructDescriptor::new(DEPARTMENT)
                .field(FieldDescriptor::new("name", TypeRef::string()))
                .field(FieldDescriptor::new(
                    "employees",
                    TypeRef::list(TypeRef::named(PERSON)),
                ))
                .field(FieldDescriptor::new(
                    "rooms",
                    TypeRef::array(TypeRef::scalar(Scalar::U16)),
                ))
                .field(FieldDescriptor::new(
                    "errorCodes",
                    TypeRef::list(TypeRef::scalar(Scalar::I32)),
                )),
        )
        .register_struct(
            StructDescriptor::new(POINT)
                .field(FieldDescriptor::new("x", TypeRef::scalar(Scalar::I32)))
                .field(FieldDescriptor::new("y", TypeRef::scalar(Scalar::I32))),
        )
        .register_struct(
            StructDescriptor::new(AUDITED)
                .field(FieldDescriptor::new("createdBy", TypeRef::string())),
        )
        .register_struct(
            StructDescriptor::new(ACCOUNT)
                .extends(TypeRef::named(AUDITED))
                .field(FieldDescriptor::new("id", TypeRef::scalar(Scalar::U64)))
                .field(FieldDescriptor::new("level", TypeRef::named(LEVEL)))
                .field(FieldDescriptor::new("homepage", TypeRef::named(URL)))
                .field(FieldDescriptor::new("password", TypeRef::string()).transient())
                .field(
                    FieldDescriptor::new("instances", TypeRef::scalar(Scalar::I32)).type_level(),
                ),
        )
        .register_enum(EnumDescriptor::new(STATE, ["ACTIVE", "INACTIVE"]))
        .register_enum(EnumDescriptor::new(LEVEL, ["LOW", "MEDIUM", "HIGH"]).ordinal())
        .register_custom(URL, |text: &str| {
            text.starts_with("http").then(|| text.to_string())
        })
        .register_struct(
            StructDescriptor::new(RESPONSE)
                .type_params(["T"])
                .field(FieldDescriptor::new("status", TypeRef::scalar(Scalar::I32)))
                .field(FieldDescriptor::new("payload", TypeRef::var("T"))),
        )
        .register_struct(
            StructDescriptor::new(PAGE)
                .type_params(["E"])
                .extends(TypeRef::generic(
                    RESPONSE,
                    vec![TypeRef::list(TypeRef::var("E"))],
                ))
                .field(FieldDescriptor::new("page", TypeRef::scalar(Scalar::U32))),
        )
        .register_struct(
            StructDescriptor::new(DICTIONARY)
                .type_params(["V"])
                .field(FieldDescriptor::new(
                    "entries",
                    TypeRef::map(TypeRef::string(), TypeRef::var("V")),
                )),
        )
        .register_struct(
            StructDescriptor::new(GRID)
                .type_params(["T"])
                .field(FieldDescriptor::new(
                    "rows",
                    TypeRef::array(TypeRef::array(TypeRef::var("T"))),
                )),
        )
        .register_struct(
            StructDescriptor::new(NODE)
                .field(FieldDescriptor::new("name", TypeRef::string()))
                .field(FieldDescriptor::new("next", TypeRef::named(NODE))),
        )
        .register_struct(
            StructDescriptor::new(SELFISH)
                .field(FieldDescriptor::new("self", TypeRef::named(SELFISH))),
        );
    registry
}

pub fn named(name: &str) -> ResolvedType {
    ResolvedType::named(name)
}

pub fn int() -> ResolvedType {
    ResolvedType::scalar(Scalar::I32)
}
