//! Generic type resolution.

use tracing::trace;

use crate::{ResolvedType, StructDescriptor, TypeError, TypeRef};

/// The concrete instantiation a declared type is resolved against: the
/// declaring type's formal parameters paired with its actual arguments.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    owner: &'a str,
    params: &'a [String],
    args: &'a [ResolvedType],
}

impl<'a> Scope<'a> {
    /// Scope of `declaring` instantiated as `instantiation`.
    pub fn new(declaring: &'a StructDescriptor, instantiation: &'a ResolvedType) -> Self {
        Self {
            owner: &declaring.name,
            params: &declaring.type_params,
            args: &instantiation.args,
        }
    }

    /// A scope with no type variables in it.
    pub fn empty() -> Self {
        Self {
            owner: "",
            params: &[],
            args: &[],
        }
    }
}

/// Substitute every type variable in `declared` with the matching argument
/// of `scope`, recursing through arrays and type applications.
pub fn resolve(declared: &TypeRef, scope: &Scope<'_>) -> Result<ResolvedType, TypeError> {
    match declared {
        TypeRef::Var(name) => {
            if scope.params.len() != scope.args.len() {
                if scope.args.is_empty() {
                    return Err(TypeError::UnsupportedShape {
                        message: format!(
                            "type variable '{}' of generic type '{}' has no concrete instantiation",
                            name, scope.owner
                        ),
                    });
                }
                return Err(TypeError::ArityMismatch {
                    owner: scope.owner.to_string(),
                    expected: scope.params.len(),
                    actual: scope.args.len(),
                });
            }
            let index = scope
                .params
                .iter()
                .position(|param| param == name)
                .ok_or_else(|| TypeError::UnboundVariable {
                    name: name.clone(),
                    owner: scope.owner.to_string(),
                })?;
            let resolved = scope.args[index].clone();
            trace!("Resolved {} of {} to {}", name, scope.owner, resolved);
            Ok(resolved)
        }
        TypeRef::Array(component) => Ok(ResolvedType::array(resolve(component, scope)?)),
        TypeRef::Apply { shape, args } => {
            let args = args
                .iter()
                .map(|arg| resolve(arg, scope))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ResolvedType::new(shape.clone(), args))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonbind_testhelpers::setup;
    use crate::Scalar;

    fn corpus() -> StructDescriptor {
        StructDescriptor::new("app.Corpus").type_params(["K", "T"])
    }

    #[test]
    fn test_concrete_type_is_unchanged() {
        setup();
        let declared = TypeRef::map(TypeRef::string(), TypeRef::scalar(Scalar::I32));
        let resolved = resolve(&declared, &Scope::empty()).unwrap();
        assert_eq!(
            resolved,
            ResolvedType::map(ResolvedType::string(), ResolvedType::scalar(Scalar::I32))
        );
    }

    #[test]
    fn test_variable_is_substituted_by_position() {
        setup();
        let desc = corpus();
        let inst = ResolvedType::generic(
            "app.Corpus",
            vec![ResolvedType::string(), ResolvedType::named("app.Person")],
        );
        let scope = Scope::new(&desc, &inst);
        assert_eq!(
            resolve(&TypeRef::var("T"), &scope).unwrap(),
            ResolvedType::named("app.Person")
        );
        assert_eq!(
            resolve(&TypeRef::var("K"), &scope).unwrap(),
            ResolvedType::string()
        );
    }

    #[test]
    fn test_nested_parameterization() {
        setup();
        let desc = corpus();
        let inst = ResolvedType::generic(
            "app.Corpus",
            vec![ResolvedType::string(), ResolvedType::named("app.Person")],
        );
        let declared = TypeRef::generic(
            "app.Dictionary",
            vec![TypeRef::map(
                TypeRef::var("K"),
                TypeRef::list(TypeRef::array(TypeRef::var("T"))),
            )],
        );
        let resolved = resolve(&declared, &Scope::new(&desc, &inst)).unwrap();
        assert_eq!(
            resolved.to_string(),
            "app.Dictionary<Map<String, List<app.Person[]>>>"
        );
    }

    #[test]
    fn test_generic_array_resolves_component_first() {
        setup();
        let desc = StructDescriptor::new("app.Holder").type_params(["T"]);
        let inst = ResolvedType::generic("app.Holder", vec![ResolvedType::scalar(Scalar::F64)]);
        let resolved = resolve(&TypeRef::array(TypeRef::var("T")), &Scope::new(&desc, &inst)).unwrap();
        assert_eq!(resolved, ResolvedType::array(ResolvedType::scalar(Scalar::F64)));
    }

    #[test]
    fn test_arity_mismatch() {
        setup();
        let desc = corpus();
        let inst = ResolvedType::generic("app.Corpus", vec![ResolvedType::string()]);
        let err = resolve(&TypeRef::var("T"), &Scope::new(&desc, &inst)).unwrap_err();
        assert_eq!(
            err,
            TypeError::ArityMismatch {
                owner: "app.Corpus".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_raw_generic_instantiation() {
        setup();
        let desc = corpus();
        let inst = ResolvedType::named("app.Corpus");
        let err = resolve(&TypeRef::var("T"), &Scope::new(&desc, &inst)).unwrap_err();
        assert!(matches!(err, TypeError::UnsupportedShape { .. }));
    }

    #[test]
    fn test_unbound_variable() {
        setup();
        let err = resolve(&TypeRef::list(TypeRef::var("X")), &Scope::empty()).unwrap_err();
        assert!(matches!(err, TypeError::UnboundVariable { ref name, .. } if name == "X"));
    }
}
