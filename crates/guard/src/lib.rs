//! # vigil-guard
//!
//! Composable runtime guards for untyped values.
//!
//! A guard checks an untyped [`Value`](value::Value) and, on acceptance,
//! decodes it into a precisely typed Rust value. Guards for complex shapes are
//! built by combining guards for their parts; the combination determines both
//! the runtime check and the static output type.
//!
//! ## Quick Start
//!
//! ```rust
//! use vigil_guard::prelude::*;
//!
//! let user = object((
//!     field("name", string()),
//!     field("email", string().nullable()),
//!     field("tags", array(string()).optional()),
//! ));
//!
//! let value = Value::object([("name", Value::from("ada")), ("email", Value::Null)]);
//! assert!(user.check(&value));
//!
//! let (name, email, tags) = user.parse(&value).unwrap();
//! assert_eq!((name.as_str(), email, tags), ("ada", None, None));
//! ```
//!
//! ## Building Blocks
//!
//! - **Primitives**: [`null`](primitives::null), [`undefined`](primitives::undefined),
//!   [`boolean`](primitives::boolean), [`number`](primitives::number),
//!   [`bigint`](primitives::bigint), [`string`](primitives::string),
//!   [`symbol`](primitives::symbol), [`unknown`](primitives::unknown),
//!   [`never`](primitives::never)
//! - **Sums**: [`union`](combinators::union), [`any_of`](combinators::any_of),
//!   [`optional`](combinators::optional), [`nullable`](combinators::nullable),
//!   [`literal`](combinators::literal)
//! - **Products**: [`tuple`](combinators::tuple), [`object`](combinators::object),
//!   [`record`](combinators::record)
//! - **Recursive**: [`array`](combinators::array), [`recursive`](combinators::recursive),
//!   [`json`](json::json)
//!
//! ## Compiled Guards
//!
//! [`compile`](compile::compile) turns any guard into a drop-in substitute
//! that runs a flattened program; see the [`compile`] module.

// ValidationError is the error of every parse call; boxing it would add an
// allocation to each rejection for no practical benefit.
#![allow(clippy::result_large_err)]
// Nested combinator types (Object<(Field<Optional<Union<..>>>, ..)>) are
// inherent to deriving the output type from structure.
#![allow(clippy::type_complexity)]

mod macros;

pub mod combinators;
pub mod compile;
pub mod foundation;
pub mod json;
pub mod prelude;
pub mod primitives;
pub mod schema;
pub mod value;
