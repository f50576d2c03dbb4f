//! Core traits for the guard system
//!
//! This module defines the trait every guard implements and the extension
//! trait that gives guards their fluent combinator methods.

use std::sync::Arc;

use crate::combinators::{BoxGuard, Map, Nullable, Optional, OptionalNullable, Union};
use crate::compile::{CompileOptions, Compiled};
use crate::foundation::ValidationError;
use crate::schema::Schema;
use crate::value::{UNDEFINED, Value};

// ============================================================================
// CORE GUARD TRAIT
// ============================================================================

/// A pure check over an untyped [`Value`].
///
/// Every guard answers in two modes that must always agree:
///
/// - **guard mode**, [`check`](Guard::check): a plain yes/no answer;
/// - **parse mode**, [`parse`](Guard::parse): the accepted value decoded
///   into [`Output`](Guard::Output), or a [`ValidationError`].
///
/// `parse(v).is_ok() == check(v)` holds for every input. Guards hold no
/// per-call state, so a single guard may be shared across threads and
/// called concurrently.
///
/// # Type inference
///
/// `Output` is the statically derived accepted type of the combinator graph:
/// `optional(string())` yields `Option<String>`, `tuple((number(), string()))`
/// yields `(f64, String)`, and so on. One imprecision is accepted on purpose:
/// `unknown()` already admits `undefined`, so a field guarded by `unknown()`
/// is optional while its output stays [`Value`] rather than `Option<Value>`.
///
/// # Examples
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let point = tuple((number(), number()));
/// let value = Value::array([1.0, 2.0]);
///
/// assert!(point.check(&value));
/// let (x, y) = point.parse(&value).unwrap();
/// assert_eq!((x, y), (1.0, 2.0));
/// ```
pub trait Guard {
    /// The statically inferred type of accepted values.
    type Output;

    /// Returns `true` iff the value is accepted.
    fn check(&self, value: &Value) -> bool;

    /// Decodes an accepted value, or explains the rejection.
    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError>;

    /// Describes the accepted set as a [`Schema`], the form consumed by the
    /// compiled backend.
    fn describe(&self) -> Schema;

    /// Returns `true` if a missing key is acceptable to this guard, i.e. the
    /// guard accepts `undefined`. Object keys are classified optional by
    /// exactly this test.
    fn accepts_missing(&self) -> bool {
        self.check(&UNDEFINED)
    }
}

/// The accepted type of a guard.
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// fn first(pair: Infer<Tuple<(IsString, Optional<IsNumber>)>>) -> String {
///     pair.0
/// }
/// assert_eq!(first(("a".into(), None)), "a");
/// ```
pub type Infer<G> = <G as Guard>::Output;

impl<G: Guard + ?Sized> Guard for &G {
    type Output = G::Output;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        (**self).check(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        (**self).parse(value)
    }

    fn describe(&self) -> Schema {
        (**self).describe()
    }

    fn accepts_missing(&self) -> bool {
        (**self).accepts_missing()
    }
}

impl<G: Guard + ?Sized> Guard for Arc<G> {
    type Output = G::Output;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        (**self).check(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        (**self).parse(value)
    }

    fn describe(&self) -> Schema {
        (**self).describe()
    }

    fn accepts_missing(&self) -> bool {
        (**self).accepts_missing()
    }
}

// ============================================================================
// GUARD EXTENSION TRAIT
// ============================================================================

/// Extension trait providing combinator methods for guards.
///
/// Automatically implemented for every [`Guard`].
///
/// # Examples
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let guard = string().or(number()).optional();
/// assert!(guard.check(&Value::Undefined));
/// assert!(guard.check(&Value::from(3)));
/// assert!(!guard.check(&Value::Null));
/// ```
pub trait GuardExt: Guard + Sized {
    /// Also accepts `undefined`; see [`optional`](crate::combinators::optional).
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Also accepts `null`; see [`nullable`](crate::combinators::nullable).
    fn nullable(self) -> Nullable<Self> {
        Nullable::new(self)
    }

    /// Also accepts `undefined` and `null`.
    fn optional_nullable(self) -> OptionalNullable<Self> {
        OptionalNullable::new(self)
    }

    /// Accepts whatever either guard accepts, trying `self` first.
    fn or<G>(self, other: G) -> Union<(Self, G)>
    where
        G: Guard,
    {
        Union::new((self, other))
    }

    /// Transforms the decoded output. Acceptance is unchanged.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, f)
    }

    /// Erases the guard's type behind a shared pointer.
    fn boxed(self) -> BoxGuard<Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        BoxGuard::new(self)
    }

    /// Builds the compiled form with default options.
    fn compile(self) -> Compiled<Self> {
        Compiled::new(self)
    }

    /// Builds the compiled form with explicit options.
    fn compile_with(self, options: CompileOptions) -> Compiled<Self> {
        Compiled::with_options(self, options)
    }
}

impl<T: Guard> GuardExt for T {}
