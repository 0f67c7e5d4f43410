mod common;

use common::*;
use jsonbind::{ErrorKind, ParseOptions, Parser, ResolvedType, Scalar, Value, Warning};
use jsonbind_testhelpers::setup;

fn scenario_types() -> Vec<ResolvedType> {
    vec![
        ResolvedType::scalar(Scalar::F64),
        named(PERSON),
        ResolvedType::string(),
        ResolvedType::scalar(Scalar::Bool),
    ]
}

fn args(text: &str, types: &[ResolvedType]) -> Vec<Value> {
    setup();
    let registry = registry();
    match jsonbind::from_str_args(text, types, &registry) {
        Ok(values) => values,
        Err(e) => panic!("Failed to parse arguments {:?}: {}", text, e),
    }
}

fn strict_args(text: &str, types: &[ResolvedType]) -> jsonbind::Result<Vec<Value>> {
    setup();
    let registry = registry();
    Parser::with_options(text.as_bytes(), &registry, ParseOptions::new().strict())
        .parse_arguments(types)
        .map(|parsed| parsed.value)
}

#[test]
fn test_mixed_argument_types() {
    let values = args(r#"[123.45,{"name":"X"},null,false]"#, &scenario_types());
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], Value::Float(123.45));
    assert_eq!(values[1].as_object().unwrap().type_name(), PERSON);
    assert_eq!(values[1].get("name"), Some(Value::from("X")));
    assert_eq!(values[2], Value::Null);
    assert_eq!(values[3], Value::Bool(false));
}

#[test]
fn test_nested_containers_as_arguments() {
    let types = [
        ResolvedType::list(int()),
        ResolvedType::map(ResolvedType::string(), named(POINT)),
    ];
    let values = args(r#"[[1,2],{"a":{"x":1,"y":2}}]"#, &types);
    assert_eq!(values[0], Value::List(vec![Value::Int(1), Value::Int(2)]));
    let map = values[1].as_map().unwrap();
    assert_eq!(
        map.get(&Value::from("a")).and_then(|p| p.get("y")),
        Some(Value::Int(2))
    );
}

#[test]
fn test_empty_array_yields_nulls() {
    let values = args("[]", &[int(), named(PERSON)]);
    assert_eq!(values, vec![Value::Null, Value::Null]);

    let values = args("  [ ]  ", &[int(), named(PERSON)]);
    assert_eq!(values, vec![Value::Null, Value::Null]);
}

#[test]
fn test_empty_stream_yields_nulls() {
    setup();
    let registry = registry();
    let parsed = Parser::new("".as_bytes(), &registry)
        .parse_arguments(&scenario_types())
        .unwrap();
    assert_eq!(parsed.value, vec![Value::Null; 4]);
    assert_eq!(parsed.warnings, vec![Warning::EmptyArguments { expected: 4 }]);

    let values = args(" \n\t", &[int()]);
    assert_eq!(values, vec![Value::Null]);
}

#[test]
fn test_missing_trailing_arguments_are_null() {
    let values = args("[7]", &[int(), ResolvedType::string()]);
    assert_eq!(values, vec![Value::Int(7), Value::Null]);

    let values = args("[7,]", &[int(), ResolvedType::string()]);
    assert_eq!(values, vec![Value::Int(7), Value::Null]);
}

#[test]
fn test_extra_arguments_are_dropped() {
    setup();
    let registry = registry();
    let parsed = Parser::new(r#"[1,"two",{"three":3},[4]]"#.as_bytes(), &registry)
        .parse_arguments(&[int()])
        .unwrap();
    assert_eq!(parsed.value, vec![Value::Int(1)]);
    assert_eq!(parsed.warnings, vec![Warning::ExtraArguments { expected: 1 }]);
}

#[test]
fn test_no_types_reads_nothing() {
    let values = args("this is not even json", &[]);
    assert!(values.is_empty());
}

#[test]
fn test_bare_items() {
    let values = args("[42,hello,ACTIVE]", &[int(), ResolvedType::string(), named(STATE)]);
    assert_eq!(values[0], Value::Int(42));
    assert_eq!(values[1], Value::from("hello"));
    assert_eq!(values[2].as_enum(), Some("ACTIVE"));
}

#[test]
fn test_argument_errors() {
    setup();
    let registry = registry();

    let err = jsonbind::from_str_args(r#"{"a":1}"#, &[int()], &registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }), "{}", err);

    let err = jsonbind::from_str_args("[1 2]", &[int(), int()], &registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }), "{}", err);

    let err = jsonbind::from_str_args("[1,2", &[int(), int()], &registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedEof), "{}", err);

    let err = jsonbind::from_str_args(r#"["X"]"#, &[named(PERSON)], &registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }), "{}", err);

    let err = jsonbind::from_str_args("[abc]", &[int()], &registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidScalar { .. }), "{}", err);
}

#[test]
fn test_strict_arguments() {
    assert_eq!(
        strict_args("[1, 2]", &[int(), int()]).unwrap(),
        vec![Value::Int(1), Value::Int(2)]
    );
    assert_eq!(
        strict_args("[]", &[int(), int()]).unwrap(),
        vec![Value::Null, Value::Null]
    );

    let err = strict_args("", &[int()]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedEof), "{}", err);

    let err = strict_args("[1,]", &[int(), int()]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }), "{}", err);

    let err = strict_args("[1,2]", &[int()]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }), "{}", err);

    let err = strict_args("[1] 2", &[int()]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }), "{}", err);
}
