//! Macros for defining guards with minimal boilerplate.
//!
//! - `primitive_guard!`: a zero-sized guard for one [`Kind`](crate::value::Kind)
//!   (struct + `Guard` impl + factory fn)
//! - `for_tuples!`: invokes a macro once per supported tuple arity

// ============================================================================
// PRIMITIVE GUARD MACRO
// ============================================================================

/// Creates a complete primitive guard: a unit struct, its `Guard`
/// implementation keyed on one kind, and a `const` factory function.
///
/// ```rust,ignore
/// primitive_guard! {
///     /// Accepts strings.
///     pub IsString => String;
///     output String;
///     parse(Value::String(s)) => s.clone();
///     fn string();
/// }
/// ```
macro_rules! primitive_guard {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident => $kind:ident;
        output $out:ty;
        parse($pat:pat) => $decode:expr;
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Guard for $name {
            type Output = $out;

            #[inline]
            fn check(&self, value: &$crate::value::Value) -> bool {
                value.kind() == $crate::value::Kind::$kind
            }

            fn parse(
                &self,
                value: &$crate::value::Value,
            ) -> Result<$out, $crate::foundation::ValidationError> {
                match value {
                    $pat => Ok($decode),
                    other => Err($crate::foundation::ValidationError::type_mismatch(
                        $crate::value::Kind::$kind,
                        other,
                    )),
                }
            }

            fn describe(&self) -> $crate::schema::Schema {
                $crate::schema::Schema::Primitive($crate::value::Kind::$kind)
            }
        }

        #[doc = concat!("Creates a [`", stringify!($name), "`] guard.")]
        #[must_use]
        $vis const fn $factory() -> $name {
            $name
        }
    };
}

// ============================================================================
// TUPLE ARITIES
// ============================================================================

/// Calls `$mac!` once per tuple arity from 1 to 8, passing
/// `(arity; Type index, ...)`.
macro_rules! for_tuples {
    ($mac:ident) => {
        $mac!(1; A 0);
        $mac!(2; A 0, B 1);
        $mac!(3; A 0, B 1, C 2);
        $mac!(4; A 0, B 1, C 2, D 3);
        $mac!(5; A 0, B 1, C 2, D 3, E 4);
        $mac!(6; A 0, B 1, C 2, D 3, E 4, F 5);
        $mac!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
        $mac!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
    };
}

pub(crate) use for_tuples;
pub(crate) use primitive_guard;
