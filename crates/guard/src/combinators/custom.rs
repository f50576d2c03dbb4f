//! Custom leaf guards built from a predicate

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{Guard, ValidationError};
use crate::schema::{Predicate, Schema};
use crate::value::{Value, stringify};

/// Accepts the values a user-supplied predicate accepts.
///
/// The predicate must be pure: the same input must always get the same
/// answer, as for every other guard.
#[derive(Clone)]
pub struct FromFn {
    name: Cow<'static, str>,
    predicate: Predicate,
}

impl FromFn {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FromFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Guard for FromFn {
    type Output = Value;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.predicate.call(value)
    }

    fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
        if self.predicate.call(value) {
            Ok(value.clone())
        } else {
            Err(ValidationError::new(
                "predicate_failed",
                format!("{} rejected {}", self.name, stringify(value)),
            )
            .with_param("predicate", self.name.clone()))
        }
    }

    fn describe(&self) -> Schema {
        Schema::Custom(self.predicate.clone())
    }
}

/// Creates a guard from a named predicate.
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let even = from_fn("even", |v| matches!(v, Value::Number(n) if n % 2.0 == 0.0));
/// assert!(even.check(&Value::from(4)));
/// assert_eq!(even.parse(&Value::from(3)).unwrap_err().code, "predicate_failed");
/// ```
pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> FromFn
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    FromFn {
        name: name.into(),
        predicate: Predicate::new(predicate),
    }
}
