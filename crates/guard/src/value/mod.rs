//! Runtime value model
//!
//! Untyped input is modelled as a closed set of tagged variants. Every guard
//! dispatches on [`Value::kind`], a single runtime type tag, rather than on
//! open-ended dynamic typing.
//!
//! A missing object key reads as [`Value::Undefined`]. That sentinel is what
//! makes a key optional: a field is optional exactly when its guard accepts
//! `Undefined`.
//!
//! # Examples
//!
//! ```rust
//! use vigil_guard::value::{Kind, Value};
//!
//! let value = Value::object([("a", Value::from(1)), ("b", Value::from("x"))]);
//! assert_eq!(value.kind(), Kind::Object);
//! assert_eq!(value.get("a"), &Value::Number(1.0));
//! assert!(value.get("missing").is_undefined());
//! ```

mod kind;
mod stringify;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::foundation::GuardError;

pub use kind::{Kind, KindSet};
pub use stringify::stringify;

/// Insertion-ordered property map of an object value.
pub type Map = IndexMap<String, Value>;

/// Shared `undefined`, handed out for missing keys and positions.
pub static UNDEFINED: Value = Value::Undefined;

// ============================================================================
// VALUE
// ============================================================================

/// An untyped runtime value.
///
/// `PartialEq` is structural and follows IEEE semantics for numbers, so
/// `NaN` is never equal to itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value; also what a missing key or position reads as.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    /// Any IEEE double, including `NaN` and the infinities.
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    /// Opaque callable, identified by name only.
    Function(Arc<str>),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Returns the runtime type tag.
    #[inline]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Undefined => Kind::Undefined,
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::BigInt(_) => Kind::BigInt,
            Self::String(_) => Kind::String,
            Self::Symbol(_) => Kind::Symbol,
            Self::Function(_) => Kind::Function,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    /// Builds an object from key/value pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds an array from anything convertible into values.
    pub fn array<T, I>(items: I) -> Self
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Builds an opaque function value.
    pub fn function(name: impl Into<Arc<str>>) -> Self {
        Self::Function(name.into())
    }

    /// Reads a property; anything other than a present key yields `undefined`.
    #[must_use]
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Self::Object(map) => map.get(key).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Reads an array position; out-of-range positions yield `undefined`.
    #[must_use]
    pub fn at(&self, index: usize) -> &Value {
        match self {
            Self::Array(items) => items.get(index).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for `null` and `undefined`.
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Strict (`===`) equality: primitives compare by value with IEEE
    /// semantics, symbols by identity. Composites carry no reference identity
    /// here, so they are never strictly equal to anything.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            _ => false,
        }
    }

    pub const fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Converts into a JSON value.
    ///
    /// Non-finite numbers become `null`, the way `JSON.stringify` renders
    /// them. `undefined`, symbols, functions and big integers anywhere in the
    /// tree have no JSON form and fail the conversion.
    pub fn to_json(&self) -> Result<serde_json::Value, GuardError> {
        Ok(match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => json_number(*n),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => serde_json::Value::Array(
                items.iter().map(Value::to_json).collect::<Result<_, _>>()?,
            ),
            Self::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                    .collect::<Result<_, GuardError>>()?,
            ),
            other => return Err(GuardError::NotJson { kind: other.kind() }),
        })
    }
}

/// Converts a double into a JSON number, preferring the integer form when
/// the value is integral and exactly representable.
pub(crate) fn json_number(n: f64) -> serde_json::Value {
    const SAFE: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() <= SAFE {
        serde_json::Value::Number((n as i64).into())
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

// ============================================================================
// SYMBOL
// ============================================================================

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(1);

/// A unique, optionally described token.
///
/// Two symbols are equal only when they come from the same [`Symbol::new`]
/// call; descriptions play no part in equality.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Mints a fresh symbol with a description.
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: Some(description.into()),
        }
    }

    /// Mints a fresh symbol without a description.
    pub fn anonymous() -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})#{}", self.description().unwrap_or(""), self.id)
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        Self::BigInt(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Self::Object(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            // Every JSON number is a double on this side, as in the host language.
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = GuardError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.to_json()
    }
}
