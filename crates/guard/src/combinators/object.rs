//! OBJECT combinator - keyed shapes over object values
//!
//! An object guard lists `(key, guard)` fields. A value passes when it is an
//! object and every listed key passes its guard; an absent key is checked as
//! `undefined`. Whether a key is required or optional is therefore never a
//! separate flag: wrapping its guard in [`optional`](crate::combinators::optional)
//! is what makes it optional.
//!
//! Objects are open by default (unlisted keys are ignored). The exact
//! variant, [`exact_object`] or [`Object::exact`], rejects unlisted keys.
//!
//! # Examples
//!
//! ```rust
//! use vigil_guard::prelude::*;
//!
//! let user = object((
//!     field("name", string()),
//!     field("age", number().optional()),
//! ));
//!
//! let value = Value::object([("name", Value::from("ada")), ("extra", Value::Null)]);
//! let (name, age) = user.parse(&value).unwrap();
//! assert_eq!(name, "ada");
//! assert_eq!(age, None);
//!
//! assert!(!user.exact().check(&value));
//! ```

use std::borrow::Cow;

use crate::foundation::{Guard, ValidationError};
use crate::macros::for_tuples;
use crate::schema::Schema;
use crate::value::{Kind, Map, UNDEFINED, Value};

// ============================================================================
// FIELD
// ============================================================================

/// One keyed entry of an object shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<G> {
    key: Cow<'static, str>,
    guard: G,
}

impl<G> Field<G> {
    pub fn new(key: impl Into<Cow<'static, str>>, guard: G) -> Self {
        Self {
            key: key.into(),
            guard,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn guard(&self) -> &G {
        &self.guard
    }
}

impl<G: Guard> Field<G> {
    /// Returns `true` if the key may be absent.
    pub fn is_optional(&self) -> bool {
        self.guard.accepts_missing()
    }

    #[inline]
    fn check_in(&self, map: &Map) -> bool {
        self.guard
            .check(map.get(self.key.as_ref()).unwrap_or(&UNDEFINED))
    }

    fn parse_in(&self, map: &Map) -> Result<G::Output, ValidationError> {
        match map.get(self.key.as_ref()) {
            Some(value) => self.guard.parse(value).map_err(|e| e.at_key(&self.key)),
            None => self
                .guard
                .parse(&UNDEFINED)
                .map_err(|e| ValidationError::missing_key(&self.key, e)),
        }
    }

    fn describe_entry(&self) -> (Cow<'static, str>, Schema) {
        (self.key.clone(), self.guard.describe())
    }
}

/// Creates an object field.
pub fn field<G: Guard>(key: impl Into<Cow<'static, str>>, guard: G) -> Field<G> {
    Field::new(key, guard)
}

// ============================================================================
// SHAPE
// ============================================================================

/// The field list of an object guard.
///
/// Implemented for `()`, tuples of up to eight [`Field`]s and
/// `Vec<Field<G>>` for shapes assembled at runtime.
pub trait Shape {
    type Output;

    fn check_fields(&self, map: &Map) -> bool;

    /// Parses the listed fields in order, stopping at the first failure.
    fn parse_fields(&self, map: &Map) -> Result<Self::Output, ValidationError>;

    fn describe_fields(&self) -> Vec<(Cow<'static, str>, Schema)>;

    fn has_key(&self, key: &str) -> bool;
}

impl Shape for () {
    type Output = ();

    fn check_fields(&self, _map: &Map) -> bool {
        true
    }

    fn parse_fields(&self, _map: &Map) -> Result<(), ValidationError> {
        Ok(())
    }

    fn describe_fields(&self) -> Vec<(Cow<'static, str>, Schema)> {
        Vec::new()
    }

    fn has_key(&self, _key: &str) -> bool {
        false
    }
}

macro_rules! impl_shape {
    ($n:tt; $($g:ident $idx:tt),+) => {
        impl<$($g: Guard),+> Shape for ($(Field<$g>,)+) {
            type Output = ($($g::Output,)+);

            #[inline]
            fn check_fields(&self, map: &Map) -> bool {
                $(self.$idx.check_in(map))&&+
            }

            fn parse_fields(&self, map: &Map) -> Result<Self::Output, ValidationError> {
                Ok(($(self.$idx.parse_in(map)?,)+))
            }

            fn describe_fields(&self) -> Vec<(Cow<'static, str>, Schema)> {
                vec![$(self.$idx.describe_entry()),+]
            }

            fn has_key(&self, key: &str) -> bool {
                $(self.$idx.key() == key)||+
            }
        }
    };
}

for_tuples!(impl_shape);

impl<G: Guard> Shape for Vec<Field<G>> {
    type Output = Vec<G::Output>;

    fn check_fields(&self, map: &Map) -> bool {
        self.iter().all(|f| f.check_in(map))
    }

    fn parse_fields(&self, map: &Map) -> Result<Self::Output, ValidationError> {
        self.iter().map(|f| f.parse_in(map)).collect()
    }

    fn describe_fields(&self) -> Vec<(Cow<'static, str>, Schema)> {
        self.iter().map(Field::describe_entry).collect()
    }

    fn has_key(&self, key: &str) -> bool {
        self.iter().any(|f| f.key() == key)
    }
}

// ============================================================================
// OBJECT
// ============================================================================

/// Accepts object values matching a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Object<S> {
    shape: S,
    exact: bool,
}

impl<S> Object<S> {
    pub fn new(shape: S) -> Self {
        Self { shape, exact: false }
    }

    /// Rejects keys the shape does not list.
    #[must_use]
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }
}

impl<S: Shape> Object<S> {
    fn unknown_key<'m>(&self, map: &'m Map) -> Option<&'m str> {
        if !self.exact {
            return None;
        }
        map.keys()
            .find(|key| !self.shape.has_key(key.as_str()))
            .map(String::as_str)
    }
}

impl<S: Shape> Guard for Object<S> {
    type Output = S::Output;

    fn check(&self, value: &Value) -> bool {
        match value {
            Value::Object(map) => {
                self.shape.check_fields(map) && self.unknown_key(map).is_none()
            }
            _ => false,
        }
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        let Value::Object(map) = value else {
            return Err(ValidationError::type_mismatch(Kind::Object, value));
        };

        let output = self.shape.parse_fields(map)?;

        if let Some(key) = self.unknown_key(map) {
            return Err(ValidationError::unknown_key(key));
        }

        Ok(output)
    }

    fn describe(&self) -> Schema {
        Schema::Object {
            fields: self.shape.describe_fields(),
            exact: self.exact,
        }
    }
}

/// Creates an open object guard.
pub fn object<S: Shape>(shape: S) -> Object<S> {
    Object::new(shape)
}

/// Creates an object guard that also rejects unlisted keys.
pub fn exact_object<S: Shape>(shape: S) -> Object<S> {
    Object::new(shape).exact()
}
