//! Primitive guards
//!
//! Leaf checks, one per runtime kind. Each is a zero-sized, `Copy` value that
//! answers with a single tag comparison.
//!
//! | Factory       | Accepts                         | Output      |
//! |---------------|---------------------------------|-------------|
//! | [`null`]      | `null`                          | `()`        |
//! | [`undefined`] | `undefined` (and missing keys)  | `()`        |
//! | [`boolean`]   | `true`, `false`                 | `bool`      |
//! | [`number`]    | any double, `NaN` and `±∞` too  | `f64`       |
//! | [`bigint`]    | big integers                    | `i128`      |
//! | [`string`]    | strings                         | `String`    |
//! | [`symbol`]    | symbols                         | [`Symbol`]  |
//! | [`unknown`]   | everything                      | [`Value`]   |
//! | [`never`]     | nothing                         | `Infallible`|

use std::convert::Infallible;

use crate::foundation::{Guard, ValidationError};
use crate::macros::primitive_guard;
use crate::schema::Schema;
use crate::value::{Symbol, Value};

primitive_guard! {
    /// Accepts only `null`.
    pub IsNull => Null;
    output ();
    parse(Value::Null) => ();
    fn null();
}

primitive_guard! {
    /// Accepts only `undefined`, which is also what a missing key reads as.
    pub IsUndefined => Undefined;
    output ();
    parse(Value::Undefined) => ();
    fn undefined();
}

primitive_guard! {
    /// Accepts booleans.
    pub IsBoolean => Boolean;
    output bool;
    parse(Value::Bool(b)) => *b;
    fn boolean();
}

primitive_guard! {
    /// Accepts every number, including `NaN` and the infinities.
    pub IsNumber => Number;
    output f64;
    parse(Value::Number(n)) => *n;
    fn number();
}

primitive_guard! {
    /// Accepts big integers.
    pub IsBigInt => BigInt;
    output i128;
    parse(Value::BigInt(n)) => *n;
    fn bigint();
}

primitive_guard! {
    /// Accepts strings.
    pub IsString => String;
    output String;
    parse(Value::String(s)) => s.clone();
    fn string();
}

primitive_guard! {
    /// Accepts symbols.
    pub IsSymbol => Symbol;
    output Symbol;
    parse(Value::Symbol(s)) => s.clone();
    fn symbol();
}

/// Accepts every value, `undefined` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IsUnknown;

impl Guard for IsUnknown {
    type Output = Value;

    #[inline]
    fn check(&self, _value: &Value) -> bool {
        true
    }

    fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
        Ok(value.clone())
    }

    fn describe(&self) -> Schema {
        Schema::Unknown
    }

    fn accepts_missing(&self) -> bool {
        true
    }
}

/// Creates an [`IsUnknown`] guard.
#[must_use]
pub const fn unknown() -> IsUnknown {
    IsUnknown
}

/// Rejects every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IsNever;

impl Guard for IsNever {
    type Output = Infallible;

    #[inline]
    fn check(&self, _value: &Value) -> bool {
        false
    }

    fn parse(&self, value: &Value) -> Result<Infallible, ValidationError> {
        Err(ValidationError::never(value))
    }

    fn describe(&self) -> Schema {
        Schema::Never
    }

    fn accepts_missing(&self) -> bool {
        false
    }
}

/// Creates an [`IsNever`] guard.
#[must_use]
pub const fn never() -> IsNever {
    IsNever
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Value> {
        vec![
            Value::Undefined,
            Value::Null,
            Value::Bool(false),
            Value::Number(0.0),
            Value::Number(f64::NAN),
            Value::BigInt(1),
            Value::from(""),
            Value::from(Symbol::new("s")),
            Value::function("f"),
            Value::array(Vec::<Value>::new()),
            Value::object(Vec::<(String, Value)>::new()),
        ]
    }

    #[test]
    fn test_each_primitive_accepts_exactly_its_kind() {
        for value in samples() {
            assert_eq!(null().check(&value), value.is_null());
            assert_eq!(undefined().check(&value), value.is_undefined());
            assert_eq!(boolean().check(&value), matches!(value, Value::Bool(_)));
            assert_eq!(number().check(&value), matches!(value, Value::Number(_)));
            assert_eq!(bigint().check(&value), matches!(value, Value::BigInt(_)));
            assert_eq!(string().check(&value), matches!(value, Value::String(_)));
            assert_eq!(symbol().check(&value), matches!(value, Value::Symbol(_)));
        }
    }

    #[test]
    fn test_unknown_and_never() {
        for value in samples() {
            assert!(unknown().check(&value));
            assert!(!never().check(&value));
            assert!(never().parse(&value).is_err());
        }
    }

    #[test]
    fn test_number_accepts_non_finite() {
        assert_eq!(number().parse(&Value::Number(f64::INFINITY)).unwrap(), f64::INFINITY);
        assert!(number().parse(&Value::Number(f64::NAN)).unwrap().is_nan());
    }

    #[test]
    fn test_parse_reports_expected_kind() {
        let error = string().parse(&Value::Null).unwrap_err();
        assert_eq!(error.code, "type_mismatch");
        assert_eq!(error.param("expected"), Some("string"));
        assert_eq!(error.param("actual"), Some("null"));
    }
}
