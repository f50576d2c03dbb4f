//! Accepted domains of the primitive guards.

use rstest::rstest;
use vigil_guard::prelude::*;

fn sample(kind: Kind) -> Value {
    match kind {
        Kind::Undefined => Value::Undefined,
        Kind::Null => Value::Null,
        Kind::Boolean => Value::Bool(false),
        Kind::Number => Value::Number(f64::NAN),
        Kind::BigInt => Value::BigInt(-1),
        Kind::String => Value::from(""),
        Kind::Symbol => Value::from(Symbol::anonymous()),
        Kind::Function => Value::function("f"),
        Kind::Array => Value::array(Vec::<Value>::new()),
        Kind::Object => Value::object(Vec::<(&str, Value)>::new()),
    }
}

fn accepted_kinds<G: Guard>(guard: &G) -> Vec<Kind> {
    Kind::ALL
        .into_iter()
        .filter(|&kind| guard.check(&sample(kind)))
        .collect()
}

#[rstest]
#[case::null(accepted_kinds(&null()), vec![Kind::Null])]
#[case::undefined(accepted_kinds(&undefined()), vec![Kind::Undefined])]
#[case::boolean(accepted_kinds(&boolean()), vec![Kind::Boolean])]
#[case::number(accepted_kinds(&number()), vec![Kind::Number])]
#[case::bigint(accepted_kinds(&bigint()), vec![Kind::BigInt])]
#[case::string(accepted_kinds(&string()), vec![Kind::String])]
#[case::symbol(accepted_kinds(&symbol()), vec![Kind::Symbol])]
#[case::never(accepted_kinds(&never()), vec![])]
fn primitive_accepts_exactly_its_kind(
    #[case] accepted: Vec<Kind>,
    #[case] expected: Vec<Kind>,
) {
    assert_eq!(accepted, expected);
}

#[test]
fn unknown_accepts_every_kind() {
    assert_eq!(accepted_kinds(&unknown()), Kind::ALL.to_vec());
}

#[rstest]
#[case(Value::Number(f64::NAN))]
#[case(Value::Number(f64::INFINITY))]
#[case(Value::Number(f64::NEG_INFINITY))]
#[case(Value::Number(-0.0))]
fn number_accepts_special_doubles(#[case] value: Value) {
    assert!(number().check(&value));
}

#[rstest]
#[case::primitive(string(), Value::from(1), "expected string, got 1")]
#[case::nested_quote(string(), Value::array([Value::from("x")]), r#"expected string, got ["x"]"#)]
fn type_mismatch_message(#[case] guard: IsString, #[case] value: Value, #[case] message: &str) {
    let error = guard.parse(&value).unwrap_err();
    assert_eq!(error.code, "type_mismatch");
    assert_eq!(error.message, message);
}

