//! RECURSIVE combinator - self-referential guards
//!
//! [`recursive`] hands the definition a [`SelfRef`] standing for the guard
//! being defined. The reference is a weak back-edge resolved on every call,
//! never during construction, so building a recursive guard cannot recurse
//! and the finished graph holds no reference cycle.
//!
//! ```rust
//! use vigil_guard::prelude::*;
//!
//! // A tree: { value: number, children: tree[] }
//! let tree: Recursive<(f64, usize)> = recursive(|this| {
//!     object((field("value", number()), field("children", array(this))))
//!         .map(|(value, children)| (value, children.len()))
//! });
//!
//! let no_children = Value::array(Vec::<Value>::new());
//! let leaf = Value::object([("value", Value::from(1)), ("children", no_children)]);
//! let root = Value::object([("value", Value::from(0)), ("children", Value::array([leaf]))]);
//! assert_eq!(tree.parse(&root).unwrap(), (0.0, 1));
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use crate::combinators::BoxGuard;
use crate::foundation::{Guard, GuardExt, ValidationError};
use crate::schema::{Predicate, RecursionId, Schema};
use crate::value::Value;

struct Node<T> {
    id: RecursionId,
    body: BoxGuard<T>,
}

// ============================================================================
// RECURSIVE
// ============================================================================

/// A guard whose definition refers to itself.
///
/// Cloning is cheap and shares the definition.
pub struct Recursive<T> {
    node: Arc<Node<T>>,
}

impl<T> Recursive<T> {
    /// Identity shared with every [`SelfRef`] of this guard.
    pub fn id(&self) -> RecursionId {
        self.node.id
    }

    /// Returns a back-edge to this guard.
    pub fn self_ref(&self) -> SelfRef<T> {
        SelfRef {
            id: self.node.id,
            node: Arc::downgrade(&self.node),
        }
    }
}

impl<T> Clone for Recursive<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T> fmt::Debug for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recursive").field("id", &self.node.id).finish()
    }
}

impl<T> Guard for Recursive<T> {
    type Output = T;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.node.body.check(value)
    }

    fn parse(&self, value: &Value) -> Result<T, ValidationError> {
        self.node.body.parse(value)
    }

    fn describe(&self) -> Schema {
        Schema::Recursive {
            id: self.node.id,
            body: Box::new(self.node.body.describe()),
        }
    }
}

/// Defines a self-referential guard.
///
/// `define` runs once, immediately, and receives the back-edge it may embed
/// anywhere in the body (clone it for more than one use). Using the
/// back-edge in a position that is evaluated before any input is consumed,
/// e.g. `recursive(|this| this)`, describes a guard with no base case and
/// does not terminate when called.
pub fn recursive<T, G, F>(define: F) -> Recursive<T>
where
    T: 'static,
    G: Guard<Output = T> + Send + Sync + 'static,
    F: FnOnce(SelfRef<T>) -> G,
{
    let id = RecursionId::next();
    let node = Arc::new_cyclic(|weak| Node {
        id,
        body: define(SelfRef {
            id,
            node: weak.clone(),
        })
        .boxed(),
    });
    tracing::trace!(%id, "defined recursive guard");
    Recursive { node }
}

// ============================================================================
// SELF REFERENCE
// ============================================================================

/// Back-edge to an enclosing [`Recursive`] guard.
///
/// Resolves at call time. If the recursive guard has been dropped the
/// reference accepts nothing and parses to an `unresolved_reference` error.
pub struct SelfRef<T> {
    id: RecursionId,
    node: Weak<Node<T>>,
}

impl<T> SelfRef<T> {
    pub fn id(&self) -> RecursionId {
        self.id
    }

    /// Returns `true` while the referenced guard is alive.
    pub fn is_resolved(&self) -> bool {
        self.node.strong_count() > 0
    }
}

impl<T> Clone for SelfRef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            node: Weak::clone(&self.node),
        }
    }
}

impl<T> fmt::Debug for SelfRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelfRef")
            .field("id", &self.id)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl<T: 'static> Guard for SelfRef<T> {
    type Output = T;

    fn check(&self, value: &Value) -> bool {
        self.node
            .upgrade()
            .is_some_and(|node| node.body.check(value))
    }

    fn parse(&self, value: &Value) -> Result<T, ValidationError> {
        match self.node.upgrade() {
            Some(node) => node.body.parse(value),
            None => Err(ValidationError::unresolved_reference()),
        }
    }

    fn describe(&self) -> Schema {
        let node = Weak::clone(&self.node);
        Schema::Ref {
            id: self.id,
            target: Predicate::new(move |value| {
                node.upgrade().is_some_and(|node| node.body.check(value))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{OneOf2, array, union};
    use crate::primitives::number;

    /// Nested number lists: `number | list[]`.
    fn nested() -> Recursive<usize> {
        recursive(|this| {
            union((number(), array(this))).map(|out| match out {
                OneOf2::A(_) => 1,
                OneOf2::B(items) => items.into_iter().sum(),
            })
        })
    }

    #[test]
    fn test_recursive_check() {
        let guard = nested();
        let value = Value::array([
            Value::from(1),
            Value::array([Value::from(2), Value::array([Value::from(3)])]),
        ]);
        assert!(guard.check(&value));
        assert_eq!(guard.parse(&value).unwrap(), 3);
        assert!(!guard.check(&Value::array([Value::array([Value::from("x")])])));
    }

    #[test]
    fn test_describe_terminates() {
        let guard = nested();
        let Schema::Recursive { id, body } = guard.describe() else {
            panic!("expected recursive schema");
        };
        assert_eq!(id, guard.id());
        assert!(body.size() < 10);
    }

    #[test]
    fn test_dangling_self_ref() {
        let guard = nested();
        let back = guard.self_ref();
        assert!(back.check(&Value::from(1)));
        drop(guard);
        assert!(!back.is_resolved());
        assert!(!back.check(&Value::from(1)));
        assert_eq!(
            back.parse(&Value::from(1)).unwrap_err().code,
            "unresolved_reference"
        );
    }
}
