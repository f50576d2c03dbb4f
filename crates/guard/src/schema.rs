//! Combinator descriptions
//!
//! A [`Schema`] is the data form of a guard graph. Every guard produces one
//! through [`Guard::describe`](crate::foundation::Guard::describe); the
//! compiled backend consumes it to build a specialized checker. The typed
//! combinators remain the reference semantics: a schema must accept exactly
//! what the guard that described it accepts.
//!
//! Recursion appears as a [`Schema::Recursive`] node whose body mentions its
//! own [`RecursionId`] through [`Schema::Ref`], so describing a recursive
//! guard terminates.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::combinators::Literal;
use crate::value::{Kind, Value};

// ============================================================================
// PREDICATE
// ============================================================================

/// A shared, opaque acceptance test.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(<function>)")
    }
}

// ============================================================================
// RECURSION ID
// ============================================================================

static NEXT_RECURSION: AtomicU64 = AtomicU64::new(1);

/// Identity of one recursive guard, shared by its self-references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecursionId(u64);

impl RecursionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_RECURSION.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RecursionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Description of the set of values a guard accepts.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Accepts everything.
    Unknown,
    /// Accepts nothing.
    Never,
    /// Accepts every value of one kind.
    Primitive(Kind),
    /// Accepts values strictly equal to a constant.
    Literal(Literal),
    /// Accepts what any member accepts; empty accepts nothing.
    Union(Vec<Schema>),
    /// Accepts arrays of exactly this length, position by position.
    Tuple(Vec<Schema>),
    /// Accepts objects whose listed keys pass; missing keys read as
    /// `undefined`. With `exact`, unlisted keys are rejected.
    Object {
        fields: Vec<(Cow<'static, str>, Schema)>,
        exact: bool,
    },
    /// Accepts objects whose every value passes.
    Record(Box<Schema>),
    /// Accepts arrays whose every element passes.
    Array(Box<Schema>),
    /// Binding site of a self-referential schema.
    Recursive { id: RecursionId, body: Box<Schema> },
    /// Back-edge to an enclosing [`Schema::Recursive`]. `target` evaluates the
    /// referenced guard directly, for when the binding site is not in scope.
    Ref { id: RecursionId, target: Predicate },
    /// User-supplied predicate.
    Custom(Predicate),
}

impl Schema {
    /// Structural key classification: does this schema accept `undefined`?
    ///
    /// Agrees with [`Guard::accepts_missing`](crate::foundation::Guard::accepts_missing)
    /// for the guard that produced the schema.
    pub fn accepts_missing(&self) -> bool {
        match self {
            Schema::Unknown => true,
            Schema::Never => false,
            Schema::Primitive(kind) => *kind == Kind::Undefined,
            Schema::Literal(literal) => literal.matches(&Value::Undefined),
            Schema::Union(members) => members.iter().any(Schema::accepts_missing),
            Schema::Tuple(_) | Schema::Object { .. } | Schema::Record(_) | Schema::Array(_) => {
                false
            }
            Schema::Recursive { body, .. } => body.accepts_missing(),
            Schema::Ref { target, .. } | Schema::Custom(target) => target.call(&Value::Undefined),
        }
    }

    /// Number of nodes in the description; references count as one.
    pub fn size(&self) -> usize {
        1 + match self {
            Schema::Union(members) | Schema::Tuple(members) => {
                members.iter().map(Schema::size).sum()
            }
            Schema::Object { fields, .. } => fields.iter().map(|(_, s)| s.size()).sum(),
            Schema::Record(inner) | Schema::Array(inner) => inner.size(),
            Schema::Recursive { body, .. } => body.size(),
            _ => 0,
        }
    }
}
