//! Prelude module for convenient imports.
//!
//! Provides a single `use vigil_guard::prelude::*;` import that brings in
//! the traits, the value model, and every guard factory.
//!
//! # Examples
//!
//! ```rust
//! use vigil_guard::prelude::*;
//!
//! let id = union((string(), number()));
//! let ids = array(id).compile();
//! assert!(ids.check(&Value::array([Value::from("a"), Value::from(1)])));
//! ```

// ============================================================================
// FOUNDATION: Core traits and errors
// ============================================================================

pub use crate::foundation::{Guard, GuardError, GuardExt, Infer, ParseResult, ValidationError};

// ============================================================================
// VALUE MODEL
// ============================================================================

pub use crate::value::{Kind, KindSet, Map, Symbol, Value, stringify};

// ============================================================================
// PRIMITIVES
// ============================================================================

pub use crate::primitives::{
    IsBigInt, IsBoolean, IsNever, IsNull, IsNumber, IsString, IsSymbol, IsUndefined, IsUnknown,
    bigint, boolean, never, null, number, string, symbol, undefined, unknown,
};

// ============================================================================
// COMBINATORS: Composition functions and types
// ============================================================================

pub use crate::combinators::{
    AnyOf, Array, BoxGuard, Elements, Equals, Field, FromFn, Lazy, Literal, Map as Mapped,
    Members, Nullable, Object, OneOf2, OneOf3, OneOf4, OneOf5, OneOf6, OneOf7, OneOf8, Optional,
    OptionalNullable, Record, Recursive, SelfRef, Shape, Tuple, Union, any_of, array, dictionary,
    exact_object, field, from_fn, lazy, literal, literal_value, nullable, object, one_of_literals,
    optional, optional_nullable, record, recursive, tuple, union,
};

// ============================================================================
// SCHEMA & COMPILED PATH
// ============================================================================

pub use crate::compile::{
    CompileOptions, Compiled, ProgramStats, compile, compiled_exact_object, compiled_object,
};
pub use crate::schema::Schema;

// ============================================================================
// JSON
// ============================================================================

pub use crate::json::{JsonError, JsonParser, JsonValue, decode_json, json, parse_json};
