//! RECORD combinator - string-keyed dictionaries with one value guard

use indexmap::IndexMap;

use crate::foundation::{Guard, ValidationError};
use crate::schema::Schema;
use crate::value::{Kind, Value};

/// Accepts objects whose every value passes the inner guard.
///
/// Arrays are never records, not even empty ones, and neither are `null`
/// or `undefined`. Keys are strings by construction of [`Value::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<G> {
    pub(crate) inner: G,
}

impl<G> Record<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: Guard> Guard for Record<G> {
    type Output = IndexMap<String, G::Output>;

    fn check(&self, value: &Value) -> bool {
        match value {
            Value::Object(map) => map.values().all(|v| self.inner.check(v)),
            _ => false,
        }
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        let Value::Object(map) = value else {
            return Err(ValidationError::type_mismatch(Kind::Object, value));
        };

        map.iter()
            .map(|(key, v)| match self.inner.parse(v) {
                Ok(out) => Ok((key.clone(), out)),
                Err(e) => Err(e.at_key(key)),
            })
            .collect()
    }

    fn describe(&self) -> Schema {
        Schema::Record(Box::new(self.inner.describe()))
    }
}

pub fn record<G: Guard>(guard: G) -> Record<G> {
    Record::new(guard)
}

/// Same as [`record`].
pub fn dictionary<G: Guard>(guard: G) -> Record<G> {
    Record::new(guard)
}
