//! TUPLE combinator - fixed-length positional arrays
//!
//! Accepts an array iff its length equals the number of element guards
//! exactly and every position passes. Extra or missing positions reject.

use crate::foundation::{Guard, ValidationError};
use crate::macros::for_tuples;
use crate::schema::Schema;
use crate::value::{Kind, UNDEFINED, Value};

/// Positional element guards of a tuple.
///
/// Implemented for `()`, tuples of up to eight guards, and `Vec<G>` for
/// tuples whose length is only known at runtime.
pub trait Elements {
    type Output;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks `items`, whose length is already known to match.
    fn check_items(&self, items: &[Value]) -> bool;

    fn parse_items(&self, items: &[Value]) -> Result<Self::Output, ValidationError>;

    fn describe_items(&self) -> Vec<Schema>;
}

impl Elements for () {
    type Output = ();

    fn len(&self) -> usize {
        0
    }

    fn check_items(&self, _items: &[Value]) -> bool {
        true
    }

    fn parse_items(&self, _items: &[Value]) -> Result<(), ValidationError> {
        Ok(())
    }

    fn describe_items(&self) -> Vec<Schema> {
        Vec::new()
    }
}

macro_rules! impl_elements {
    ($n:tt; $($g:ident $idx:tt),+) => {
        impl<$($g: Guard),+> Elements for ($($g,)+) {
            type Output = ($($g::Output,)+);

            fn len(&self) -> usize {
                $n
            }

            #[inline]
            fn check_items(&self, items: &[Value]) -> bool {
                $(self.$idx.check(items.get($idx).unwrap_or(&UNDEFINED)))&&+
            }

            fn parse_items(&self, items: &[Value]) -> Result<Self::Output, ValidationError> {
                Ok(($(
                    self.$idx
                        .parse(items.get($idx).unwrap_or(&UNDEFINED))
                        .map_err(|e| e.at_index($idx))?,
                )+))
            }

            fn describe_items(&self) -> Vec<Schema> {
                vec![$(self.$idx.describe()),+]
            }
        }
    };
}

for_tuples!(impl_elements);

impl<G: Guard> Elements for Vec<G> {
    type Output = Vec<G::Output>;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn check_items(&self, items: &[Value]) -> bool {
        self.iter().zip(items).all(|(guard, item)| guard.check(item))
    }

    fn parse_items(&self, items: &[Value]) -> Result<Self::Output, ValidationError> {
        self.iter()
            .zip(items)
            .enumerate()
            .map(|(i, (guard, item))| guard.parse(item).map_err(|e| e.at_index(i)))
            .collect()
    }

    fn describe_items(&self) -> Vec<Schema> {
        self.iter().map(Guard::describe).collect()
    }
}

/// Accepts arrays of exactly the element count, position by position.
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let pair = tuple((string(), number()));
/// assert!(pair.check(&Value::array([Value::from("a"), Value::from(1)])));
/// assert!(!pair.check(&Value::array([Value::from("a")])));
/// assert!(tuple(()).check(&Value::array(Vec::<Value>::new())));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuple<E> {
    elements: E,
}

impl<E> Tuple<E> {
    pub fn new(elements: E) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &E {
        &self.elements
    }
}

impl<E: Elements> Guard for Tuple<E> {
    type Output = E::Output;

    fn check(&self, value: &Value) -> bool {
        match value {
            Value::Array(items) => {
                items.len() == self.elements.len() && self.elements.check_items(items)
            }
            _ => false,
        }
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        let Value::Array(items) = value else {
            return Err(ValidationError::type_mismatch(Kind::Array, value));
        };

        if items.len() != self.elements.len() {
            return Err(ValidationError::tuple_length(self.elements.len(), items.len()));
        }

        self.elements.parse_items(items)
    }

    fn describe(&self) -> Schema {
        Schema::Tuple(self.elements.describe_items())
    }
}

pub fn tuple<E: Elements>(elements: E) -> Tuple<E> {
    Tuple::new(elements)
}
