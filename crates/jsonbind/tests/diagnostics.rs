mod common;

use common::*;
use jsonbind::ErrorKind;
use jsonbind_testhelpers::setup;

fn render(text: &str) -> (jsonbind::Error, String) {
    setup();
    let registry = registry();
    let err = jsonbind::from_str(text, &named(PERSON), &registry).unwrap_err();
    let rendered = err.render("input.json");
    let plain = String::from_utf8(strip_ansi_escapes::strip(&rendered)).unwrap();
    (err, plain)
}

#[test]
fn test_render_syntax_error() {
    let (err, plain) = render(r#"{"name":"X" "age":1}"#);
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    assert!(plain.contains("syntax error"), "{}", plain);
    assert!(plain.contains("input.json"), "{}", plain);
    assert!(plain.contains(r#"{"name":"X" "age""#), "{}", plain);
    assert!(plain.contains("char #"), "{}", plain);
}

#[test]
fn test_display_carries_position_and_sample() {
    let (err, _) = render("{name:John Doe}");
    let message = err.to_string();
    assert!(message.contains("followed by whitespace"), "{}", message);
    assert!(message.contains("char #"), "{}", message);
    assert!(message.contains("{name:John D"), "{}", message);
}

#[test]
fn test_sample_is_limited_to_recent_input() {
    let padding = " ".repeat(200);
    let (err, _) = render(&format!("{{\"name\":\"X\",{}\"age\":[1]}}", padding));
    let context = err.context.expect("context");
    assert_eq!(context.sample.chars().count(), 64);
    assert!(context.sample.ends_with(r#""age":["#), "{:?}", context.sample);
    assert_eq!(context.char_index, Some(12 + 200 + 7 - 1));
}

#[test]
fn test_error_before_input_is_read() {
    setup();
    let registry = registry();
    let raw = jsonbind::ResolvedType::new(jsonbind::Shape::Map, Vec::new());
    let err = jsonbind::from_str("{}", &raw, &registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedType { .. }));
    assert!(err.to_string().ends_with("at start of input"), "{}", err);

    let plain = String::from_utf8(strip_ansi_escapes::strip(err.render("input.json"))).unwrap();
    assert!(plain.contains("unsupported type"), "{}", plain);
}
