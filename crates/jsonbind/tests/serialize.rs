mod common;

use common::*;
use jsonbind::{ErrorKind, MapValue, ObjectRef, SerializeOptions, Serializer, Value, Warning};
use jsonbind_testhelpers::setup;

fn to_json(value: &Value) -> String {
    setup();
    let registry = registry();
    match jsonbind::to_string(value, &registry) {
        Ok(json) => json,
        Err(e) => panic!("Failed to serialize {:?}: {}", value, e),
    }
}

fn serialize(value: &Value, options: SerializeOptions) -> (String, Vec<Warning>) {
    setup();
    let registry = registry();
    let mut out = Vec::new();
    let warnings = Serializer::with_options(&mut out, &registry, options)
        .serialize(value)
        .unwrap();
    (String::from_utf8(out).unwrap(), warnings)
}

fn state(name: &str, ordinal: usize) -> Value {
    Value::Enum {
        type_name: STATE.to_string(),
        name: name.to_string(),
        ordinal,
    }
}

fn manager() -> Value {
    let report = ObjectRef::new(PERSON).with("name", "Bo").with("age", 20);
    ObjectRef::new(MANAGER)
        .with("name", "Ann")
        .with("age", 45)
        .with("reports", Value::List(vec![report.into()]))
        .into()
}

#[test]
fn test_flat_object() {
    let member = ObjectRef::new(MEMBER)
        .with("name", "John Doe")
        .with("state", state("ACTIVE", 0));
    insta::assert_snapshot!(to_json(&member.into()), @r#"{"name":"John Doe","state":"ACTIVE"}"#);
}

#[test]
fn test_declared_field_missing_from_object() {
    let person = ObjectRef::new(PERSON).with("name", "X");
    insta::assert_snapshot!(to_json(&person.into()), @r#"{"name":"X","age":null}"#);
}

#[test]
fn test_scalars() {
    let values = Value::List(vec![
        Value::Char('x'),
        Value::UInt(u64::MAX),
        Value::Float(-0.5),
        Value::Int(-3),
        Value::Bool(true),
        Value::Null,
    ]);
    insta::assert_snapshot!(to_json(&values), @r#"["x",18446744073709551615,-0.5,-3,true,null]"#);
}

#[test]
fn test_string_escapes() {
    let value = Value::from("line\n\"quoted\"\\ /tab\t\u{1}");
    assert_eq!(to_json(&value), r#""line\n\"quoted\"\\ /tab\t\u0001""#);
}

#[test]
fn test_superclass_fields_follow_own_fields() {
    insta::assert_snapshot!(
        to_json(&manager()),
        @r#"{"reports":[{"name":"Bo","age":20}],"name":"Ann","age":45}"#
    );
}

#[test]
fn test_skipped_fields() {
    let account = ObjectRef::new(ACCOUNT)
        .with("id", 7u64)
        .with(
            "level",
            Value::Enum {
                type_name: LEVEL.to_string(),
                name: "HIGH".to_string(),
                ordinal: 2,
            },
        )
        .with(
            "homepage",
            Value::Custom {
                type_name: URL.to_string(),
                text: "https://example.com".to_string(),
            },
        )
        .with("password", "secret")
        .with("instances", 3)
        .with("createdBy", "root");

    // transient, type-level and other-module superclass fields are left out
    insta::assert_snapshot!(
        to_json(&account.into()),
        @r#"{"id":7,"level":2,"homepage":"https://example.com"}"#
    );
}

#[test]
fn test_type_tag_on_root_only() {
    let (json, _) = serialize(&manager(), SerializeOptions::new().tagged());
    insta::assert_snapshot!(
        json,
        @r#"{"class":"app.model.Manager","reports":[{"name":"Bo","age":20}],"name":"Ann","age":45}"#
    );

    let list = Value::List(vec![ObjectRef::new(POINT).with("x", 1).with("y", 2).into()]);
    let (json, _) = serialize(&list, SerializeOptions::new().tagged());
    insta::assert_snapshot!(json, @r#"[{"x":1,"y":2}]"#);

    let point: Value = ObjectRef::new(POINT).with("x", 1).with("y", 2).into();
    let (json, _) = serialize(&point, SerializeOptions::new().tagged().type_tag_key("@type"));
    insta::assert_snapshot!(json, @r#"{"@type":"app.model.Point","x":1,"y":2}"#);
}

#[test]
fn test_map_keys() {
    let map: MapValue = [
        (Value::Int(1964), Value::from("worker")),
        (Value::Int(0), Value::from("specialist")),
    ]
    .into_iter()
    .collect();
    insta::assert_snapshot!(to_json(&map.into()), @r#"{1964:"worker",0:"specialist"}"#);

    let key = ObjectRef::new(POINT).with("x", 1).with("y", 2);
    let map: MapValue = [(Value::from(key), Value::from("A"))].into_iter().collect();
    insta::assert_snapshot!(to_json(&map.into()), @r#"{{"x":1,"y":2}:"A"}"#);
}

#[test]
fn test_self_reference_is_null() {
    let selfish = ObjectRef::new(SELFISH);
    selfish.set("self", selfish.clone());

    let (json, warnings) = serialize(&selfish.into(), SerializeOptions::default());
    insta::assert_snapshot!(json, @r#"{"self":null}"#);
    assert_eq!(
        warnings,
        vec![Warning::CircularReference {
            type_name: SELFISH.to_string(),
            chain: vec![SELFISH.to_string()],
        }]
    );
}

#[test]
fn test_longer_cycle_terminates() {
    let a = ObjectRef::new(NODE).with("name", "a");
    let b = ObjectRef::new(NODE).with("name", "b").with("next", a.clone());
    a.set("next", b);

    let (json, warnings) = serialize(&a.into(), SerializeOptions::default());
    insta::assert_snapshot!(json, @r#"{"name":"a","next":{"name":"b","next":null}}"#);
    assert!(matches!(
        &warnings[..],
        [Warning::CircularReference { chain, .. }] if chain.len() == 2
    ));
}

#[test]
fn test_shared_object_is_not_a_cycle() {
    let shared = ObjectRef::new(PERSON).with("name", "S").with("age", 1);
    let list = Value::List(vec![shared.clone().into(), shared.into()]);
    let (json, warnings) = serialize(&list, SerializeOptions::default());
    insta::assert_snapshot!(json, @r#"[{"name":"S","age":1},{"name":"S","age":1}]"#);
    assert!(warnings.is_empty());
}

fn nested_lists(depth: usize) -> Value {
    (0..depth).fold(Value::Int(1), |inner, _| Value::List(vec![inner]))
}

#[test]
fn test_deep_graph_is_an_error() {
    setup();
    let registry = registry();
    assert_eq!(jsonbind::to_string(&nested_lists(3), &registry).unwrap(), "[[[1]]]");

    let err = jsonbind::to_string(&nested_lists(500), &registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TooDeep { max_depth: 128 }), "{}", err);

    let mut out = Vec::new();
    let err = Serializer::with_options(&mut out, &registry, SerializeOptions::new().max_depth(2))
        .serialize(&nested_lists(3))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TooDeep { max_depth: 2 }), "{}", err);

    // objects count as a level like containers do
    let holder = ObjectRef::new(DEPARTMENT).with("employees", nested_lists(1));
    let mut out = Vec::new();
    let result = Serializer::with_options(&mut out, &registry, SerializeOptions::new().max_depth(2))
        .serialize(&holder.into());
    assert!(result.is_ok());
}

#[test]
fn test_non_finite_numbers() {
    let values = Value::List(vec![Value::Float(f64::NAN), Value::Float(1.5)]);
    let (json, warnings) = serialize(&values, SerializeOptions::default());
    assert_eq!(json, "[null,1.5]");
    assert!(matches!(&warnings[..], [Warning::NonFiniteNumber { value }] if value.is_nan()));
}

#[test]
fn test_unregistered_type_writes_stored_fields() {
    let thing = ObjectRef::new("other.Thing").with("b", 1).with("a", true);
    insta::assert_snapshot!(to_json(&thing.into()), @r#"{"b":1,"a":true}"#);
}

#[test]
fn test_to_writer() {
    setup();
    let registry = registry();
    let mut out = Vec::new();
    let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
    jsonbind::to_writer(&mut out, &list, &registry).unwrap();
    assert_eq!(out, b"[1,2]");
}

#[test]
fn test_output_is_valid_json() {
    let dept: Value = ObjectRef::new(DEPARTMENT)
        .with("name", "Réseau \u{1f}\"ops\"")
        .with(
            "employees",
            Value::List(vec![ObjectRef::new(PERSON).with("name", "Zoë").with("age", 33).into()]),
        )
        .with("rooms", Value::Array(vec![Value::UInt(1), Value::UInt(2)]))
        .with("errorCodes", Value::List(Vec::new()))
        .into();

    let json = to_json(&dept);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["name"], "Réseau \u{1f}\"ops\"");
    assert_eq!(parsed["employees"][0]["name"], "Zoë");
    assert_eq!(parsed["employees"][0]["age"], 33);
    assert_eq!(parsed["rooms"], serde_json::json!([1, 2]));
    assert_eq!(parsed["errorCodes"], serde_json::json!([]));
}
