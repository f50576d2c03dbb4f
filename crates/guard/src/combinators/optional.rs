//! OPTIONAL / NULLABLE combinators - widen a guard with `undefined` or `null`
//!
//! Each is exactly the union of its inner guard with the corresponding
//! nullish primitive, but decodes into `Option` instead of a sum:
//!
//! | combinator          | also accepts          | output              |
//! |---------------------|-----------------------|---------------------|
//! | [`optional`]        | `undefined`           | `Option<T>`         |
//! | [`nullable`]        | `null`                | `Option<T>`         |
//! | [`optional_nullable`] | `undefined`, `null` | `Option<Option<T>>` |
//!
//! The nullish members come first, as in `union((undefined(), v))`: a
//! nullish value always decodes to `None`, even when the inner guard
//! accepts it too.

use crate::foundation::{Guard, ValidationError};
use crate::schema::Schema;
use crate::value::{Kind, Value};

// ============================================================================
// OPTIONAL
// ============================================================================

/// Accepts `undefined` in addition to what the inner guard accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optional<G> {
    pub(crate) inner: G,
}

impl<G> Optional<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Guard> Guard for Optional<G> {
    type Output = Option<G::Output>;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.is_undefined() || self.inner.check(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        if value.is_undefined() {
            return Ok(None);
        }
        self.inner
            .parse(value)
            .map(Some)
            .map_err(|e| widened(value, &[Kind::Undefined], e))
    }

    fn describe(&self) -> Schema {
        Schema::Union(vec![Schema::Primitive(Kind::Undefined), self.inner.describe()])
    }

    fn accepts_missing(&self) -> bool {
        true
    }
}

pub fn optional<G: Guard>(guard: G) -> Optional<G> {
    Optional::new(guard)
}

// ============================================================================
// NULLABLE
// ============================================================================

/// Accepts `null` in addition to what the inner guard accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nullable<G> {
    pub(crate) inner: G,
}

impl<G> Nullable<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Guard> Guard for Nullable<G> {
    type Output = Option<G::Output>;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.is_null() || self.inner.check(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        if value.is_null() {
            return Ok(None);
        }
        self.inner
            .parse(value)
            .map(Some)
            .map_err(|e| widened(value, &[Kind::Null], e))
    }

    fn describe(&self) -> Schema {
        Schema::Union(vec![Schema::Primitive(Kind::Null), self.inner.describe()])
    }

    fn accepts_missing(&self) -> bool {
        self.inner.accepts_missing()
    }
}

pub fn nullable<G: Guard>(guard: G) -> Nullable<G> {
    Nullable::new(guard)
}

// ============================================================================
// OPTIONAL NULLABLE
// ============================================================================

/// Accepts both `undefined` and `null` in addition to the inner guard.
///
/// The outer `Option` is `None` for `undefined`; the inner one is `None` for
/// `null`, mirroring `Option<Option<T>>` patch semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalNullable<G> {
    pub(crate) inner: G,
}

impl<G> OptionalNullable<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Guard> Guard for OptionalNullable<G> {
    type Output = Option<Option<G::Output>>;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        value.is_nullish() || self.inner.check(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        match value {
            Value::Undefined => Ok(None),
            Value::Null => Ok(Some(None)),
            _ => self
                .inner
                .parse(value)
                .map(|out| Some(Some(out)))
                .map_err(|e| widened(value, &[Kind::Undefined, Kind::Null], e)),
        }
    }

    fn describe(&self) -> Schema {
        Schema::Union(vec![
            Schema::Primitive(Kind::Undefined),
            Schema::Primitive(Kind::Null),
            self.inner.describe(),
        ])
    }

    fn accepts_missing(&self) -> bool {
        true
    }
}

pub fn optional_nullable<G: Guard>(guard: G) -> OptionalNullable<G> {
    OptionalNullable::new(guard)
}

/// Reports a widened guard's rejection as the union it stands for.
fn widened(value: &Value, nullish: &[Kind], inner: ValidationError) -> ValidationError {
    let mut errors: Vec<_> = nullish
        .iter()
        .map(|kind| ValidationError::type_mismatch(kind, value))
        .collect();
    errors.push(inner);
    ValidationError::union_failed(value, errors)
}
