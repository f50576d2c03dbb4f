//! Type-erased guards

use std::fmt;
use std::sync::Arc;

use crate::foundation::{Guard, ValidationError};
use crate::schema::Schema;
use crate::value::Value;

/// A shared guard with its concrete type erased.
///
/// Lets guards of different types but one output live in the same `Vec`
/// (see [`any_of`](crate::combinators::any_of)) and breaks the infinite type
/// a self-referential definition would otherwise have.
pub struct BoxGuard<T> {
    inner: Arc<dyn Guard<Output = T> + Send + Sync>,
}

impl<T> BoxGuard<T> {
    pub fn new<G>(guard: G) -> Self
    where
        G: Guard<Output = T> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(guard),
        }
    }
}

impl<T> Clone for BoxGuard<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for BoxGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoxGuard").field(&self.inner.describe()).finish()
    }
}

impl<T> Guard for BoxGuard<T> {
    type Output = T;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.inner.check(value)
    }

    fn parse(&self, value: &Value) -> Result<T, ValidationError> {
        self.inner.parse(value)
    }

    fn describe(&self) -> Schema {
        self.inner.describe()
    }

    fn accepts_missing(&self) -> bool {
        self.inner.accepts_missing()
    }
}
