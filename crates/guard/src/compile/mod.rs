//! Compiled execution path
//!
//! [`Compiled`] wraps any guard and, once at construction, lowers its
//! [`Schema`](crate::schema::Schema) into a flat [`Program`]. `check` then
//! runs the program instead of dispatching through the combinator graph.
//!
//! The two paths are interchangeable: a compiled guard accepts and rejects
//! exactly the inputs its source guard does, for every [`CompileOptions`]
//! combination, recursive guards included. `parse` is served by the source
//! guard, since decoding needs the typed combinators.
//!
//! # Examples
//!
//! ```rust
//! use vigil_guard::prelude::*;
//!
//! let shape = (field("id", number()), field("tags", array(string()).optional()));
//! let interpreted = object(shape.clone());
//! let compiled = compiled_object(shape);
//!
//! let value = Value::object([("id", Value::from(7))]);
//! assert_eq!(interpreted.check(&value), compiled.check(&value));
//! assert_eq!(compiled.parse(&value).unwrap(), (7.0, None));
//! ```

mod program;

use serde::{Deserialize, Serialize};

use crate::combinators::{Object, Shape};
use crate::foundation::{Guard, ValidationError};
use crate::schema::Schema;
use crate::value::{UNDEFINED, Value};

pub use program::{NodeId, Program, ProgramStats};

// ============================================================================
// OPTIONS
// ============================================================================

/// Build-step switches. Every rewrite is behavior-preserving; turning one
/// off only changes the shape of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    fold_kinds: bool,
    prune_trivial_fields: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            fold_kinds: true,
            prune_trivial_fields: true,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten unions and merge primitive members into one kind test.
    pub fn with_fold_kinds(mut self, enabled: bool) -> Self {
        self.fold_kinds = enabled;
        self
    }

    /// Drop optional fields that accept everything and collapse containers
    /// of `unknown` into kind tests.
    pub fn with_prune_trivial_fields(mut self, enabled: bool) -> Self {
        self.prune_trivial_fields = enabled;
        self
    }

    pub fn fold_kinds(&self) -> bool {
        self.fold_kinds
    }

    pub fn prune_trivial_fields(&self) -> bool {
        self.prune_trivial_fields
    }
}

// ============================================================================
// COMPILED GUARD
// ============================================================================

/// A guard paired with its compiled program.
#[derive(Debug, Clone)]
pub struct Compiled<G> {
    guard: G,
    program: Program,
}

impl<G: Guard> Compiled<G> {
    pub fn new(guard: G) -> Self {
        Self::with_options(guard, CompileOptions::default())
    }

    pub fn with_options(guard: G, options: CompileOptions) -> Self {
        let program = Program::build(&guard.describe(), options);
        Self { guard, program }
    }
}

impl<G> Compiled<G> {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn stats(&self) -> ProgramStats {
        self.program.stats()
    }

    pub fn inner(&self) -> &G {
        &self.guard
    }

    pub fn into_inner(self) -> G {
        self.guard
    }
}

impl<G: Guard> Guard for Compiled<G> {
    type Output = G::Output;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.program.check(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        self.guard.parse(value)
    }

    fn describe(&self) -> Schema {
        self.guard.describe()
    }

    fn accepts_missing(&self) -> bool {
        self.program.check(&UNDEFINED)
    }
}

/// Compiles a guard with default options.
pub fn compile<G: Guard>(guard: G) -> Compiled<G> {
    Compiled::new(guard)
}

/// Compiled counterpart of [`object`](crate::combinators::object).
pub fn compiled_object<S: Shape>(shape: S) -> Compiled<Object<S>> {
    Compiled::new(Object::new(shape))
}

/// Compiled counterpart of [`exact_object`](crate::combinators::exact_object).
pub fn compiled_exact_object<S: Shape>(shape: S) -> Compiled<Object<S>> {
    Compiled::new(Object::new(shape).exact())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{
        OneOf2, array, field, literal, object, optional, record, recursive, union,
    };
    use crate::foundation::GuardExt;
    use crate::primitives::{boolean, never, number, string, unknown};

    #[test]
    fn test_compiled_object_matches_interpreted() {
        let shape = (field("a", string()), field("b", number().optional()));
        let interpreted = object(shape.clone());
        let compiled = compiled_object(shape);

        for value in [
            Value::object([("a", Value::from("x"))]),
            Value::object([("a", Value::from("x")), ("b", Value::from(1))]),
            Value::object([("a", Value::from("x")), ("b", Value::Null)]),
            Value::object([("b", Value::from(1))]),
            Value::object([("a", Value::Undefined)]),
            Value::Null,
            Value::array(Vec::<Value>::new()),
        ] {
            assert_eq!(interpreted.check(&value), compiled.check(&value), "{value}");
        }
    }

    #[test]
    fn test_mixed_object_emits_only_container_closures() {
        let shape = (
            field("id", number()),
            field("label", string().nullable()),
            field("tags", array(string()).optional()),
            field(
                "owner",
                object((
                    field("name", string()),
                    field("score", union((number(), literal("n/a"))).optional()),
                )),
            ),
            field("active", boolean()),
        );
        let interpreted = object(shape.clone());
        let compiled = compiled_object(shape);
        assert_eq!(compiled.stats().closures, 5);

        let owner = Value::object([("name", Value::from("ada")), ("score", Value::from("n/a"))]);
        let values = [
            Value::object([
                ("id", Value::from(1)),
                ("label", Value::Null),
                ("tags", Value::array(["a"])),
                ("owner", owner.clone()),
                ("active", Value::from(true)),
            ]),
            Value::object([
                ("id", Value::from(1)),
                ("label", Value::from("x")),
                ("owner", Value::object([("name", Value::from("ada"))])),
                ("active", Value::from(false)),
            ]),
            Value::object([
                ("id", Value::from(1)),
                ("label", Value::Null),
                ("tags", Value::array([1])),
                ("owner", owner.clone()),
                ("active", Value::from(true)),
            ]),
            Value::object([("id", Value::from(1)), ("owner", owner), ("active", Value::from(true))]),
            Value::Null,
        ];
        for value in &values {
            assert_eq!(compiled.check(value), interpreted.check(value), "{value}");
        }
        assert!(compiled.check(&values[0]));
        assert!(compiled.check(&values[1]));
        assert!(!compiled.check(&values[2]));
    }

    #[test]
    fn test_compiled_exact_object() {
        let guard = compiled_exact_object((field("a", unknown()),));
        assert!(guard.check(&Value::object([("a", Value::Null)])));
        assert!(guard.check(&Value::object(Vec::<(&str, Value)>::new())));
        assert!(!guard.check(&Value::object([("b", Value::Null)])));
    }

    #[test]
    fn test_vacuous_array_survives_compilation() {
        let guard = array(never()).compile();
        assert!(guard.check(&Value::array(Vec::<Value>::new())));
        assert!(!guard.check(&Value::array([Value::Null])));
    }

    #[test]
    fn test_recursive_guard_compiles() {
        let guard = recursive(|this| union((number(), record(this))).map(|_| ()));
        let compiled = guard.clone().compile();
        let nested = Value::object([("a", Value::object([("b", Value::from(1))]))]);
        let bad = Value::object([("a", Value::object([("b", Value::from("x"))]))]);
        assert!(compiled.check(&nested));
        assert!(!compiled.check(&bad));
        assert_eq!(compiled.check(&bad), guard.check(&bad));
    }

    #[test]
    fn test_inner_binding_may_alias_outer() {
        let guard = recursive(|outer| {
            union((number(), array(recursive(move |_inner| outer)))).map(|_| ())
        });
        let compiled = guard.clone().compile();
        let nested = Value::array([Value::from(1), Value::array([Value::from(2)])]);
        let bad = Value::array([Value::array([Value::from("x")])]);
        assert!(compiled.check(&nested));
        assert!(!compiled.check(&bad));
        assert_eq!(compiled.check(&nested), guard.check(&nested));
    }

    #[test]
    fn test_options_do_not_change_acceptance() {
        let guard = object((field("x", union((string(), number()))), field("y", unknown())));
        let value = Value::object([("x", Value::from(true))]);
        for options in [
            CompileOptions::new(),
            CompileOptions::new().with_fold_kinds(false),
            CompileOptions::new().with_prune_trivial_fields(false),
        ] {
            assert!(!(&guard).compile_with(options).check(&value));
        }
    }

    #[test]
    fn test_parse_delegates() {
        let guard = optional(union((string(), number()))).compile();
        assert_eq!(guard.parse(&Value::from(1)).unwrap(), Some(OneOf2::B(1.0)));
        assert!(guard.accepts_missing());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: CompileOptions = serde_json::from_str(r#"{"fold_kinds": false}"#).unwrap();
        assert!(!options.fold_kinds());
        assert!(options.prune_trivial_fields());
    }
}
