//! JSON values: the self-referential JSON guard and safe text decoding
//!
//! [`json()`] accepts exactly the values JSON can express: `null`, booleans,
//! numbers, strings, and arrays or string-keyed objects of JSON values, nested
//! to any depth. It is defined in terms of itself through
//! [`recursive`](crate::combinators::recursive).
//!
//! [`parse_json`] wraps a guard into a text decoder that never panics:
//! malformed text and rejected data come back as the two variants of
//! [`JsonError`].
//!
//! # Examples
//!
//! ```
//! use vigil_guard::prelude::*;
//!
//! let point = parse_json(object((field("a", number()),)));
//!
//! assert_eq!(point.parse(r#"{"a":1}"#).unwrap(), (1.0,));
//! assert!(point.parse("not json").unwrap_err().is_decode());
//! assert!(point.parse(r#"{"a":"x"}"#).unwrap_err().is_invalid());
//! ```

use std::sync::LazyLock;

use thiserror::Error;

use crate::combinators::{OneOf6, Recursive, array, record, recursive, union};
use crate::foundation::{Guard, GuardExt, ValidationError};
use crate::primitives::{boolean, null, number, string};
use crate::value::{Value, json_number};

// ============================================================================
// JSON VALUE GUARD
// ============================================================================

/// The JSON value guard; decodes into [`serde_json::Value`].
pub type JsonValue = Recursive<serde_json::Value>;

static JSON: LazyLock<JsonValue> = LazyLock::new(|| {
    recursive(|this| {
        union((
            null(),
            boolean(),
            number(),
            string(),
            record(this.clone()),
            array(this),
        ))
        .map(|out| match out {
            OneOf6::A(()) => serde_json::Value::Null,
            OneOf6::B(b) => serde_json::Value::Bool(b),
            // Non-finite numbers are accepted and decode as `null`.
            OneOf6::C(n) => json_number(n),
            OneOf6::D(s) => serde_json::Value::String(s),
            OneOf6::E(map) => serde_json::Value::Object(map.into_iter().collect()),
            OneOf6::F(items) => serde_json::Value::Array(items),
        })
    })
});

/// Returns the JSON value guard.
///
/// The guard is built once per process; every call returns a cheap handle
/// to the same definition.
///
/// ```
/// use vigil_guard::prelude::*;
///
/// let nested = Value::object([("a", Value::array([Value::from(1), Value::Null]))]);
/// assert!(json().check(&nested));
/// assert!(!json().check(&Value::array([Value::Undefined])));
/// ```
pub fn json() -> JsonValue {
    JSON.clone()
}

// ============================================================================
// DECODE WRAPPER
// ============================================================================

/// Failure of [`JsonParser::parse`].
#[derive(Debug, Error)]
pub enum JsonError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The text decoded, but the guard rejected the data.
    #[error("JSON rejected: {0}")]
    Invalid(#[source] ValidationError),
}

impl JsonError {
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The guard's rejection, if the text decoded.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(error) => Some(error),
            Self::Decode(_) => None,
        }
    }
}

/// Decodes JSON text and runs a guard over the result.
#[derive(Debug, Clone)]
pub struct JsonParser<G> {
    guard: G,
}

impl<G: Guard> JsonParser<G> {
    pub fn new(guard: G) -> Self {
        Self { guard }
    }

    pub fn guard(&self) -> &G {
        &self.guard
    }

    pub fn parse(&self, text: &str) -> Result<G::Output, JsonError> {
        decode_json(&self.guard, text)
    }

    /// Returns `true` iff `text` decodes and the guard accepts the result.
    pub fn check(&self, text: &str) -> bool {
        serde_json::from_str::<serde_json::Value>(text)
            .is_ok_and(|decoded| self.guard.check(&Value::from(decoded)))
    }
}

/// Wraps a guard into a JSON text parser.
pub fn parse_json<G: Guard>(guard: G) -> JsonParser<G> {
    JsonParser::new(guard)
}

/// One-shot form of [`parse_json`].
pub fn decode_json<G: Guard>(guard: &G, text: &str) -> Result<G::Output, JsonError> {
    let decoded: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        tracing::trace!(error = %e, "JSON text did not decode");
        JsonError::Decode(e)
    })?;

    guard.parse(&Value::from(decoded)).map_err(|e| {
        tracing::trace!(code = %e.code, field = ?e.field, "decoded JSON rejected");
        JsonError::Invalid(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{field, object};
    use crate::value::Symbol;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_accepts_nested_structures() {
        let value = Value::from(json!({"a": [1, "x", null, {"b": true}]}));
        assert!(json().check(&value));
        assert_eq!(json().parse(&value).unwrap(), json!({"a": [1, "x", null, {"b": true}]}));
    }

    #[test]
    fn test_json_rejects_foreign_values_anywhere() {
        for foreign in [
            Value::function("f"),
            Value::from(Symbol::new("s")),
            Value::Undefined,
            Value::BigInt(1),
        ] {
            let nested = Value::object([("a", Value::array([Value::Null, foreign.clone()]))]);
            assert!(!json().check(&foreign));
            assert!(!json().check(&nested), "{nested}");
        }
    }

    #[test]
    fn test_json_non_finite_decodes_as_null() {
        assert_eq!(json().parse(&Value::Number(f64::NAN)).unwrap(), json!(null));
    }

    #[test]
    fn test_parse_json_outcomes() {
        let parser = parse_json(object((field("a", number()),)));
        assert_eq!(parser.parse(r#"{"a":1}"#).unwrap(), (1.0,));

        let decode = parser.parse("not json").unwrap_err();
        assert!(decode.is_decode());
        assert!(decode.validation().is_none());

        let invalid = parser.parse(r#"{"a":"x"}"#).unwrap_err();
        assert!(invalid.is_invalid());
        assert_eq!(invalid.validation().map(|e| &*e.code), Some("type_mismatch"));
    }

    #[test]
    fn test_parser_check() {
        let parser = parse_json(json());
        assert!(parser.check("[1, {\"a\": null}]"));
        assert!(!parser.check("[1,"));
    }
}
