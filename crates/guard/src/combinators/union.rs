//! UNION combinator - accepts what any member accepts
//!
//! Two forms share the same semantics (ordered, short-circuit, left to
//! right; no members accepts nothing):
//!
//! - [`union`] over a tuple of guards of *different* types. Its output is a
//!   `OneOfN` enum naming which member matched, the sum of the members'
//!   output types.
//! - [`any_of`] over a `Vec` of guards of *one* type, with that type's
//!   output. This is the form for member lists built at runtime.
//!
//! # Examples
//!
//! ```rust
//! use vigil_guard::prelude::*;
//!
//! let id = union((string(), number()));
//! match id.parse(&Value::from(7)).unwrap() {
//!     OneOf2::A(text) => panic!("unexpected string {text}"),
//!     OneOf2::B(n) => assert_eq!(n, 7.0),
//! }
//!
//! assert!(!union(()).check(&Value::Null));
//! ```

use std::convert::Infallible;

use crate::foundation::{Guard, ValidationError};
use crate::macros::for_tuples;
use crate::schema::Schema;
use crate::value::Value;

// ============================================================================
// OUTPUT SUMS
// ============================================================================

macro_rules! one_of {
    ($(#[$meta:meta])* $name:ident: $($var:ident),+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name<$($var),+> {
            $($var($var)),+
        }
    };
}

one_of!(
    /// Output of a two-member union: which member matched, and its value.
    OneOf2: A, B
);
one_of!(OneOf3: A, B, C);
one_of!(OneOf4: A, B, C, D);
one_of!(OneOf5: A, B, C, D, E);
one_of!(OneOf6: A, B, C, D, E, F);
one_of!(OneOf7: A, B, C, D, E, F, G);
one_of!(OneOf8: A, B, C, D, E, F, G, H);

// ============================================================================
// MEMBERS
// ============================================================================

/// An ordered, fixed collection of union members.
///
/// Implemented for `()` (the empty union), single guards in a 1-tuple, and
/// tuples of up to eight guards.
pub trait Members {
    type Output;

    fn check_any(&self, value: &Value) -> bool;

    /// Parses with the first member that accepts; on total failure returns
    /// every member's error in order.
    fn parse_first(&self, value: &Value) -> Result<Self::Output, Vec<ValidationError>>;

    fn describe_members(&self, out: &mut Vec<Schema>);
}

impl Members for () {
    type Output = Infallible;

    fn check_any(&self, _value: &Value) -> bool {
        false
    }

    fn parse_first(&self, _value: &Value) -> Result<Infallible, Vec<ValidationError>> {
        Err(Vec::new())
    }

    fn describe_members(&self, _out: &mut Vec<Schema>) {}
}

macro_rules! impl_members {
    (1; $g:ident $idx:tt) => {
        impl<$g: Guard> Members for ($g,) {
            type Output = $g::Output;

            #[inline]
            fn check_any(&self, value: &Value) -> bool {
                self.$idx.check(value)
            }

            fn parse_first(&self, value: &Value) -> Result<Self::Output, Vec<ValidationError>> {
                self.$idx.parse(value).map_err(|e| vec![e])
            }

            fn describe_members(&self, out: &mut Vec<Schema>) {
                out.push(self.$idx.describe());
            }
        }
    };
    ($n:tt; $($g:ident $idx:tt),+) => {
        paste_one_of!($n; $($g $idx),+);
    };
}

macro_rules! paste_one_of {
    (2; $($g:ident $idx:tt),+) => { impl_members_as!(OneOf2; $($g $idx),+); };
    (3; $($g:ident $idx:tt),+) => { impl_members_as!(OneOf3; $($g $idx),+); };
    (4; $($g:ident $idx:tt),+) => { impl_members_as!(OneOf4; $($g $idx),+); };
    (5; $($g:ident $idx:tt),+) => { impl_members_as!(OneOf5; $($g $idx),+); };
    (6; $($g:ident $idx:tt),+) => { impl_members_as!(OneOf6; $($g $idx),+); };
    (7; $($g:ident $idx:tt),+) => { impl_members_as!(OneOf7; $($g $idx),+); };
    (8; $($g:ident $idx:tt),+) => { impl_members_as!(OneOf8; $($g $idx),+); };
}

macro_rules! impl_members_as {
    ($sum:ident; $($g:ident $idx:tt),+) => {
        impl<$($g: Guard),+> Members for ($($g,)+) {
            type Output = $sum<$($g::Output),+>;

            #[inline]
            fn check_any(&self, value: &Value) -> bool {
                $(self.$idx.check(value))||+
            }

            fn parse_first(&self, value: &Value) -> Result<Self::Output, Vec<ValidationError>> {
                let mut errors = Vec::new();
                $(
                    match self.$idx.parse(value) {
                        Ok(out) => return Ok($sum::$g(out)),
                        Err(e) => errors.push(e),
                    }
                )+
                Err(errors)
            }

            fn describe_members(&self, out: &mut Vec<Schema>) {
                $(out.push(self.$idx.describe());)+
            }
        }
    };
}

for_tuples!(impl_members);

// ============================================================================
// UNION
// ============================================================================

/// Accepts a value iff any member accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Union<M> {
    members: M,
}

impl<M> Union<M> {
    pub fn new(members: M) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &M {
        &self.members
    }

    pub fn into_members(self) -> M {
        self.members
    }
}

impl<M: Members> Guard for Union<M> {
    type Output = M::Output;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.members.check_any(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        self.members
            .parse_first(value)
            .map_err(|errors| ValidationError::union_failed(value, errors))
    }

    fn describe(&self) -> Schema {
        let mut members = Vec::new();
        self.members.describe_members(&mut members);
        Schema::Union(members)
    }
}

/// Creates a union over a tuple of guards.
pub fn union<M: Members>(members: M) -> Union<M> {
    Union::new(members)
}

// ============================================================================
// ANY OF
// ============================================================================

/// Accepts a value iff any guard in the list accepts it.
///
/// The homogeneous counterpart of [`Union`]: an empty list accepts nothing
/// and a single-element list behaves exactly like its element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyOf<G> {
    guards: Vec<G>,
}

impl<G> AnyOf<G> {
    pub fn new(guards: Vec<G>) -> Self {
        Self { guards }
    }

    pub fn guards(&self) -> &[G] {
        &self.guards
    }
}

impl<G> FromIterator<G> for AnyOf<G> {
    fn from_iter<I: IntoIterator<Item = G>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<G: Guard> Guard for AnyOf<G> {
    type Output = G::Output;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.guards.iter().any(|g| g.check(value))
    }

    fn parse(&self, value: &Value) -> Result<G::Output, ValidationError> {
        let mut errors = Vec::new();

        for guard in &self.guards {
            match guard.parse(value) {
                Ok(out) => return Ok(out),
                Err(e) => errors.push(e),
            }
        }

        Err(ValidationError::union_failed(value, errors))
    }

    fn describe(&self) -> Schema {
        Schema::Union(self.guards.iter().map(Guard::describe).collect())
    }
}

/// Creates a union over a list of same-typed guards.
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let guard = any_of(vec![literal(1), literal(2)]);
/// assert!(guard.check(&Value::from(2)));
/// assert!(!any_of(Vec::<IsString>::new()).check(&Value::from("x")));
/// ```
pub fn any_of<G: Guard>(guards: Vec<G>) -> AnyOf<G> {
    AnyOf::new(guards)
}
