//! MAP combinator - post-processes decoded output

use std::fmt;

use crate::foundation::{Guard, ValidationError};
use crate::schema::Schema;
use crate::value::Value;

/// Applies a function to the inner guard's output.
///
/// Acceptance is exactly the inner guard's; only the decoded type changes.
#[derive(Clone, Copy)]
pub struct Map<G, F> {
    inner: G,
    f: F,
}

impl<G, F> Map<G, F> {
    pub fn new(inner: G, f: F) -> Self {
        Self { inner, f }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G, F, U> Guard for Map<G, F>
where
    G: Guard,
    F: Fn(G::Output) -> U,
{
    type Output = U;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.inner.check(value)
    }

    fn parse(&self, value: &Value) -> Result<U, ValidationError> {
        self.inner.parse(value).map(&self.f)
    }

    fn describe(&self) -> Schema {
        self.inner.describe()
    }

    fn accepts_missing(&self) -> bool {
        self.inner.accepts_missing()
    }
}

impl<G: fmt::Debug, F> fmt::Debug for Map<G, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("inner", &self.inner).finish_non_exhaustive()
    }
}
