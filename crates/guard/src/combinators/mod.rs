//! Combinators: guards built from other guards
//!
//! - **Sums**: [`union`], [`any_of`], [`optional`], [`nullable`],
//!   [`optional_nullable`], [`literal`], [`one_of_literals`]
//! - **Products**: [`tuple`], [`object`], [`exact_object`], [`record`],
//!   [`dictionary`]
//! - **Recursive**: [`array`], [`recursive`], [`lazy`]
//! - **Plumbing**: [`Map`], [`BoxGuard`], [`from_fn`]
//!
//! Every combinator accepts any guard as input, including other combinators
//! and, through [`recursive`], itself.

mod array;
mod boxed;
mod custom;
mod lazy;
mod literal;
mod map;
mod object;
mod optional;
mod record;
mod recursive;
mod tuple;
mod union;

pub use array::{Array, array};
pub use boxed::BoxGuard;
pub use custom::{FromFn, from_fn};
pub use lazy::{Lazy, lazy};
pub use literal::{Equals, Literal, literal, literal_value, one_of_literals};
pub use map::Map;
pub use object::{Field, Object, Shape, exact_object, field, object};
pub use optional::{
    Nullable, Optional, OptionalNullable, nullable, optional, optional_nullable,
};
pub use record::{Record, dictionary, record};
pub use recursive::{Recursive, SelfRef, recursive};
pub use tuple::{Elements, Tuple, tuple};
pub use union::{
    AnyOf, Members, OneOf2, OneOf3, OneOf4, OneOf5, OneOf6, OneOf7, OneOf8, Union, any_of, union,
};
