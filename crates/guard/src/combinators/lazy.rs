//! LAZY combinator - guards built on first use

use std::fmt;
use std::sync::OnceLock;

use crate::foundation::{Guard, ValidationError};
use crate::schema::Schema;
use crate::value::Value;

// ============================================================================
// LAZY COMBINATOR
// ============================================================================

/// A guard whose construction is deferred until it first sees a value.
///
/// Meant for guards that are costly to build, such as large shapes or
/// compiled programs, and for thunk-style references to a guard that is
/// only available later. Describing a lazy guard builds it, so the builder
/// must not reach the lazy guard itself; [`recursive`](crate::combinators::recursive)
/// covers self-reference.
///
/// # Examples
///
/// ```rust
/// use vigil_guard::prelude::*;
///
/// let guard = lazy(|| object((field("id", number()),)).compile());
/// assert!(!guard.is_built());
///
/// assert!(guard.check(&Value::object([("id", Value::from(1))])));
/// assert!(guard.is_built());
/// ```
pub struct Lazy<G, F>
where
    F: Fn() -> G,
{
    build: F,
    built: OnceLock<G>,
}

impl<G, F> Lazy<G, F>
where
    F: Fn() -> G,
{
    /// Wraps `build`, which runs at most once.
    pub fn new(build: F) -> Self {
        Self {
            build,
            built: OnceLock::new(),
        }
    }

    /// The guard, if some call has already built it.
    pub fn built(&self) -> Option<&G> {
        self.built.get()
    }

    pub fn is_built(&self) -> bool {
        self.built.get().is_some()
    }

    /// The guard, building it now if needed.
    pub fn guard(&self) -> &G {
        self.built.get_or_init(&self.build)
    }
}

impl<G, F> Guard for Lazy<G, F>
where
    G: Guard,
    F: Fn() -> G,
{
    type Output = G::Output;

    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.guard().check(value)
    }

    fn parse(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        self.guard().parse(value)
    }

    fn describe(&self) -> Schema {
        self.guard().describe()
    }

    fn accepts_missing(&self) -> bool {
        self.guard().accepts_missing()
    }
}

/// Shows the built guard's schema. Formatting never triggers the build.
impl<G, F> fmt::Debug for Lazy<G, F>
where
    G: Guard,
    F: Fn() -> G,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_tuple("Lazy");
        match self.built() {
            Some(guard) => out.field(&guard.describe()),
            None => out.field(&format_args!("<unbuilt>")),
        };
        out.finish()
    }
}

/// Creates a LAZY combinator.
pub fn lazy<G, F>(build: F) -> Lazy<G, F>
where
    F: Fn() -> G,
{
    Lazy::new(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{IsString, string};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted(builds: &Arc<AtomicUsize>) -> Lazy<IsString, impl Fn() -> IsString> {
        let builds = Arc::clone(builds);
        lazy(move || {
            builds.fetch_add(1, Ordering::SeqCst);
            string()
        })
    }

    #[test]
    fn test_nothing_built_before_first_value() {
        let builds = Arc::new(AtomicUsize::new(0));
        let guard = counted(&builds);

        assert!(!guard.is_built());
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_built_once_across_calls() {
        let builds = Arc::new(AtomicUsize::new(0));
        let guard = counted(&builds);

        assert!(guard.check(&Value::from("a")));
        assert!(!guard.check(&Value::from(1)));
        assert_eq!(guard.parse(&Value::from("b")).unwrap(), "b");
        assert!(!guard.accepts_missing());

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_describe_builds() {
        let guard = lazy(string);
        assert!(matches!(guard.describe(), Schema::Primitive(_)));
        assert!(guard.built().is_some());
    }

    #[test]
    fn test_debug_shows_schema_once_built() {
        let builds = Arc::new(AtomicUsize::new(0));
        let guard = counted(&builds);

        assert_eq!(format!("{guard:?}"), "Lazy(<unbuilt>)");
        assert_eq!(builds.load(Ordering::SeqCst), 0);

        guard.guard();
        assert_eq!(format!("{guard:?}"), format!("Lazy({:?})", string().describe()));
    }

    #[test]
    fn test_forward_reference() {
        let late = Arc::new(OnceLock::new());
        let slot = Arc::clone(&late);
        let guard = lazy(move || slot.get().copied().unwrap_or_default());
        late.set(string()).unwrap();
        assert!(guard.check(&Value::from("x")));
    }
}
