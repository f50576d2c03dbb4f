//! LITERAL combinator - strict equality with a primitive constant

use std::borrow::Cow;

use crate::combinators::AnyOf;
use crate::foundation::{Guard, GuardError, ValidationError};
use crate::schema::Schema;
use crate::value::{Kind, Symbol, Value};

/// A primitive constant a [`literal`] guard compares against.
///
/// Composite values cannot be literals: there is no `From` conversion for
/// them, and [`Literal::try_from`] rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(Cow<'static, str>),
    Symbol(Symbol),
}

impl Literal {
    /// Strict equality: `NaN` matches nothing, `0` matches `-0`, and values of
    /// different kinds never match.
    #[inline]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Undefined, Value::Undefined) | (Literal::Null, Value::Null) => true,
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => a == b,
            (Literal::BigInt(a), Value::BigInt(b)) => a == b,
            (Literal::String(a), Value::String(b)) => a.as_ref() == b.as_str(),
            (Literal::Symbol(a), Value::Symbol(b)) => a == b,
            _ => false,
        }
    }

    pub const fn kind(&self) -> Kind {
        match self {
            Literal::Undefined => Kind::Undefined,
            Literal::Null => Kind::Null,
            Literal::Bool(_) => Kind::Boolean,
            Literal::Number(_) => Kind::Number,
            Literal::BigInt(_) => Kind::BigInt,
            Literal::String(_) => Kind::String,
            Literal::Symbol(_) => Kind::Symbol,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Literal::Undefined => Value::Undefined,
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::BigInt(n) => Value::BigInt(*n),
            Literal::String(s) => Value::String(s.to_string()),
            Literal::Symbol(s) => Value::Symbol(s.clone()),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(f64::from(value))
    }
}

impl From<i128> for Literal {
    fn from(value: i128) -> Self {
        Literal::BigInt(value)
    }
}

impl From<&'static str> for Literal {
    fn from(value: &'static str) -> Self {
        Literal::String(Cow::Borrowed(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(Cow::Owned(value))
    }
}

impl From<Symbol> for Literal {
    fn from(value: Symbol) -> Self {
        Literal::Symbol(value)
    }
}

impl TryFrom<Value> for Literal {
    type Error = GuardError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Undefined => Literal::Undefined,
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Bool(b),
            Value::Number(n) => Literal::Number(n),
            Value::BigInt(n) => Literal::BigInt(n),
            Value::String(s) => Literal::String(Cow::Owned(s)),
            Value::Symbol(s) => Literal::Symbol(s),
            other => return Err(GuardError::CompositeLiteral { kind: other.kind() }),
        })
    }
}

// ============================================================================
// EQUALS GUARD
// ============================================================================

/// Accepts only values strictly equal to one constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Equals {
    literal: Literal,
}

impl Equals {
    pub fn new(literal: impl Into<Literal>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }
}

impl Guard for Equals {
    type Output = Literal;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.literal.matches(value)
    }

    fn parse(&self, value: &Value) -> Result<Literal, ValidationError> {
        if self.literal.matches(value) {
            Ok(self.literal.clone())
        } else {
            Err(ValidationError::literal_mismatch(&self.literal.to_value(), value))
        }
    }

    fn describe(&self) -> Schema {
        Schema::Literal(self.literal.clone())
    }
}

/// Creates a guard accepting only `value`.
///
/// Only primitive Rust values convert into a [`Literal`], so a composite
/// literal does not compile.
///
/// # Examples
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let admin = literal("admin");
/// assert!(admin.check(&Value::from("admin")));
/// assert!(!admin.check(&Value::from("user")));
/// ```
pub fn literal(value: impl Into<Literal>) -> Equals {
    Equals::new(value)
}

/// Creates a literal guard from a runtime value, rejecting composites.
///
/// # Examples
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// assert!(literal_value(Value::from(1)).is_ok());
/// assert!(literal_value(Value::array([1])).is_err());
/// ```
pub fn literal_value(value: Value) -> Result<Equals, GuardError> {
    Literal::try_from(value).map(Equals::new)
}

/// Accepts any one of several constants.
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let role = one_of_literals(["admin", "user"]);
/// assert!(role.check(&Value::from("user")));
/// assert!(!role.check(&Value::from("root")));
/// ```
pub fn one_of_literals<L, I>(values: I) -> AnyOf<Equals>
where
    L: Into<Literal>,
    I: IntoIterator<Item = L>,
{
    values.into_iter().map(Equals::new).collect()
}
