//! Decoding JSON text through guards.

use pretty_assertions::assert_eq;
use serde_json::json;
use vigil_guard::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn parse_json_returns_decoded_value() {
    let parser = parse_json(object((field("a", number()),)));
    assert_eq!(parser.parse(r#"{"a":1}"#).unwrap(), (1.0,));
}

#[test]
fn parse_json_reports_decode_failure_with_cause() {
    init_tracing();
    let parser = parse_json(object((field("a", number()),)));
    let error = parser.parse("not json").unwrap_err();
    let JsonError::Decode(cause) = &error else {
        panic!("expected decode failure, got {error:?}");
    };
    assert!(cause.is_syntax());
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn parse_json_reports_validation_failure() {
    let parser = parse_json(object((field("a", number()),)));
    let error = parser.parse(r#"{"a":"x"}"#).unwrap_err();
    let rejection = error.validation().unwrap();
    assert_eq!(rejection.code, "type_mismatch");
    assert_eq!(rejection.field.as_deref(), Some("a"));
}

#[test]
fn compiled_guard_decodes_like_interpreted() {
    init_tracing();
    let shape = (field("id", number()), field("tags", array(string()).optional()));
    let text = r#"{"id": 3, "tags": ["x", "y"], "ignored": true}"#;
    assert_eq!(
        decode_json(&compiled_object(shape.clone()), text).unwrap(),
        decode_json(&object(shape), text).unwrap(),
    );
}

#[test]
fn json_guard_round_trips_documents() {
    let document = json!({
        "name": "vigil",
        "version": 1,
        "ratio": 0.5,
        "tags": ["a", "b"],
        "nested": {"deep": [null, true, {"x": []}]}
    });
    let parsed = parse_json(json()).parse(&document.to_string()).unwrap();
    assert_eq!(parsed, document);
}

#[test]
fn json_guard_compiles() {
    let compiled = json().compile();
    assert!(compiled.check(&Value::from(json!({"a": [1, "x", null, {"b": true}]}))));
    assert!(!compiled.check(&Value::object([(
        "a",
        Value::array([Value::object([("b", Value::function("f"))])]),
    )])));
    assert!(!compiled.check(&Value::array([Value::Undefined])));
}

#[test]
fn rejection_serializes_for_reporting() {
    let parser = parse_json(object((field("a", array(number())),)));
    let error = parser.parse(r#"{"a":[1,"two"]}"#).unwrap_err();
    let report = serde_json::to_value(error.validation().unwrap()).unwrap();
    assert_eq!(report["code"], json!("type_mismatch"));
    assert_eq!(report["field"], json!("a[1]"));
}
