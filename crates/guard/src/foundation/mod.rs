//! Core guard types and traits
//!
//! - **Traits**: [`Guard`], [`GuardExt`]
//! - **Errors**: [`ValidationError`] for rejected data, [`GuardError`] for
//!   misuse at construction time
//!
//! # Architecture
//!
//! ## 1. One value model
//!
//! Every guard takes the same untyped [`Value`](crate::value::Value), so any
//! guard can be embedded in any combinator, including itself.
//!
//! ## 2. Two answers, one decision
//!
//! ```rust,ignore
//! let guard = object((field("a", string()),));
//! guard.check(&value);          // guard mode: bool
//! guard.parse(&value)?;         // parse mode: (String,) or ValidationError
//! ```
//!
//! ## 3. Types follow structure
//!
//! The accepted type is derived from the combinator graph through
//! [`Guard::Output`]; wrapping a field in `optional` turns its output into
//! `Option<T>` and its key into an optional key at the same time.

pub mod error;
pub mod traits;

pub use error::{GuardError, ValidationError};
pub use traits::{Guard, GuardExt, Infer};

/// A parse-mode result.
pub type ParseResult<T> = Result<T, ValidationError>;
