//! Error types
//!
//! Two regimes never mix:
//!
//! - [`ValidationError`] is a *data* outcome: parse mode returns it when a
//!   well-formed value does not match the shape. It carries a stable code,
//!   a message built with [`stringify`], and the key/index path.
//! - [`GuardError`] is a *programmer* error raised while building a guard or
//!   converting between value models, e.g. a composite literal.
//!
//! All string fields use `Cow<'static, str>` so static codes and messages
//! never allocate.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::value::{Kind, Value, stringify};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured parse-mode failure.
///
/// # Examples
///
/// ```rust
/// use vigil_guard::foundation::ValidationError;
///
/// let error = ValidationError::new("type_mismatch", "expected string, got 1")
///     .at_key("name")
///     .at_index(0)
///     .at_key("users");
/// assert_eq!(error.field.as_deref(), Some("users[0].name"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Stable code for programmatic handling, e.g. `"type_mismatch"`.
    pub code: Cow<'static, str>,

    /// Human-readable message in English.
    pub message: Cow<'static, str>,

    /// Path of the offending value relative to the validated root,
    /// e.g. `"users[0].name"`. `None` means the root itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Cow<'static, str>>,

    /// Ordered key/value parameters (typically 0-2).
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>,

    /// Causes, e.g. every member's failure under a union.
    ///
    /// Nested paths are relative to this error's `field`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: SmallVec::new(),
            nested: Vec::new(),
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the nested errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Adds a single nested error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested_error(mut self, error: ValidationError) -> Self {
        self.nested.push(error);
        self
    }

    /// Prefixes the path with an object key.
    #[must_use = "builder methods must be chained or built"]
    pub fn at_key(mut self, key: &str) -> Self {
        self.prefix_path(key.to_owned());
        self
    }

    /// Prefixes the path with an array position.
    #[must_use = "builder methods must be chained or built"]
    pub fn at_index(mut self, index: usize) -> Self {
        self.prefix_path(format!("[{index}]"));
        self
    }

    fn prefix_path(&mut self, segment: String) {
        self.field = Some(match self.field.take() {
            None => segment.into(),
            Some(rest) if rest.starts_with('[') => format!("{segment}{rest}").into(),
            Some(rest) => format!("{segment}.{rest}").into(),
        });
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if this error has nested errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Returns the number of errors (including nested).
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(ValidationError::total_error_count)
            .sum::<usize>()
    }

    /// Flattens all errors into a single list (depth-first).
    #[must_use]
    pub fn flatten(&self) -> Vec<&ValidationError> {
        let mut result = vec![self];
        for nested in &self.nested {
            result.extend(nested.flatten());
        }
        result
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// The value's kind is not the expected one.
    pub fn type_mismatch(expected: impl fmt::Display, actual: &Value) -> Self {
        Self::new(
            "type_mismatch",
            format!("expected {expected}, got {}", stringify(actual)),
        )
        .with_param("expected", expected.to_string())
        .with_param("actual", actual.kind().as_str())
    }

    /// Raised by `never()`, which accepts nothing.
    pub fn never(actual: &Value) -> Self {
        Self::new(
            "never",
            format!("no value is accepted here, got {}", stringify(actual)),
        )
    }

    /// The value is not strictly equal to the expected constant.
    pub fn literal_mismatch(expected: &Value, actual: &Value) -> Self {
        Self::new(
            "literal_mismatch",
            format!("expected {}, got {}", stringify(expected), stringify(actual)),
        )
        .with_param("expected", stringify(expected))
    }

    /// Every member of a union rejected the value.
    pub fn union_failed(actual: &Value, errors: Vec<ValidationError>) -> Self {
        let message = if errors.is_empty() {
            format!("empty union accepts nothing, got {}", stringify(actual))
        } else {
            format!(
                "none of {} alternatives accepted {}",
                errors.len(),
                stringify(actual)
            )
        };
        Self::new("union_failed", message).with_nested(errors)
    }

    /// A tuple received an array of the wrong length.
    pub fn tuple_length(expected: usize, actual: usize) -> Self {
        Self::new(
            "tuple_length",
            format!("expected exactly {expected} elements, got {actual}"),
        )
        .with_param("expected", expected.to_string())
        .with_param("actual", actual.to_string())
    }

    /// An exact object received a key its shape does not list.
    pub fn unknown_key(key: &str) -> Self {
        Self::new("unknown_key", format!("unexpected key {key:?}")).with_field(key.to_owned())
    }

    /// A required key is absent.
    pub fn missing_key(key: &str, cause: ValidationError) -> Self {
        Self::new("missing_key", format!("missing required key {key:?}"))
            .with_field(key.to_owned())
            .with_nested_error(cause)
    }

    /// A self-reference outlived the recursive guard it points into.
    pub fn unresolved_reference() -> Self {
        Self::new(
            "unresolved_reference",
            "recursive guard was dropped before use",
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if self.has_nested() {
            write!(f, "\n  Nested errors:")?;
            for (i, error) in self.nested.iter().enumerate() {
                write!(f, "\n    {}. {}", i + 1, error)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// GUARD ERROR
// ============================================================================

/// Programmer errors detected while building guards or converting values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GuardError {
    /// `literal_value` was handed an array, object or function.
    #[error("literal must be a primitive value, got {kind}")]
    CompositeLiteral { kind: Kind },

    /// A value has no JSON representation.
    #[error("{kind} has no JSON representation")]
    NotJson { kind: Kind },
}
