//! ARRAY combinator - homogeneous arrays of any length

use crate::foundation::{Guard, ValidationError};
use crate::schema::Schema;
use crate::value::{Kind, Value};

/// Accepts arrays whose every element passes the inner guard.
///
/// The empty array is always accepted, whatever the element guard: an
/// all-elements predicate holds vacuously.
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// assert!(array(never()).check(&Value::array(Vec::<Value>::new())));
/// assert!(array(number()).check(&Value::array([1.0, 2.0])));
/// assert!(!array(number()).check(&Value::Null));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Array<G> {
    pub(crate) inner: G,
}

impl<G> Array<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: Guard> Guard for Array<G> {
    type Output = Vec<G::Output>;

    fn check(&self, value: &Value) -> bool {
        match value {
            Value::Array(items) => items.iter().all(|item| self.inner.check(item)),
            _ => false,
        }
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        let Value::Array(items) = value else {
            return Err(ValidationError::type_mismatch(Kind::Array, value));
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.inner.parse(item).map_err(|e| e.at_index(i)))
            .collect()
    }

    fn describe(&self) -> Schema {
        Schema::Array(Box::new(self.inner.describe()))
    }
}

pub fn array<G: Guard>(guard: G) -> Array<G> {
    Array::new(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{field, object};
    use crate::primitives::{never, string};

    #[test]
    fn test_vacuous_truth() {
        let empty = Value::array(Vec::<Value>::new());
        assert!(array(never()).check(&empty));
        assert_eq!(array(never()).parse(&empty).unwrap().len(), 0);
    }

    #[test]
    fn test_rejects_non_arrays() {
        let guard = array(string());
        for value in [
            Value::Null,
            Value::Undefined,
            Value::from("abc"),
            Value::object(Vec::<(&str, Value)>::new()),
        ] {
            assert!(!guard.check(&value), "{value}");
        }
    }

    #[test]
    fn test_error_path_through_nesting() {
        let guard = object((field("users", array(object((field("name", string()),)))),));
        let value = Value::object([(
            "users",
            Value::array([Value::object([("name", Value::Null)])]),
        )]);
        assert_eq!(
            guard.parse(&value).unwrap_err().field.as_deref(),
            Some("users[0].name")
        );
    }
}
