//! Runtime type tags and sets of them

use std::fmt;

use serde::Serialize;

/// The runtime type tag of a [`Value`](super::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
    Function,
    Array,
    Object,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 10] = [
        Kind::Undefined,
        Kind::Null,
        Kind::Boolean,
        Kind::Number,
        Kind::BigInt,
        Kind::String,
        Kind::Symbol,
        Kind::Function,
        Kind::Array,
        Kind::Object,
    ];

    /// Lowercase name, as used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::BigInt => "bigint",
            Kind::String => "string",
            Kind::Symbol => "symbol",
            Kind::Function => "function",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// True for kinds a `literal` may be built from.
    pub const fn is_primitive(self) -> bool {
        !matches!(self, Kind::Function | Kind::Array | Kind::Object)
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// KIND SET
// ============================================================================

/// A set of [`Kind`]s packed into a bitmask.
///
/// Membership is a single mask test, which is what lets the compiled backend
/// collapse a union of primitive guards into one comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u16);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);

    /// Creates a set holding a single kind.
    pub const fn only(kind: Kind) -> Self {
        Self(kind.bit())
    }

    #[inline]
    pub const fn contains(self, kind: Kind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[must_use]
    pub const fn with(self, kind: Kind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn insert(&mut self, kind: Kind) {
        self.0 |= kind.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Kind> {
        Kind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<Kind> for KindSet {
    fn from_iter<I: IntoIterator<Item = Kind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, KindSet::with)
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in self.iter() {
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(kind.as_str())?;
            first = false;
        }
        if first {
            f.write_str("never")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_set_membership() {
        let set: KindSet = [Kind::Null, Kind::String].into_iter().collect();
        assert!(set.contains(Kind::Null));
        assert!(set.contains(Kind::String));
        assert!(!set.contains(Kind::Undefined));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_kind_set_display() {
        let set = KindSet::only(Kind::Number).with(Kind::Null);
        assert_eq!(set.to_string(), "null | number");
        assert_eq!(KindSet::EMPTY.to_string(), "never");
    }

    #[test]
    fn test_all_kinds_fit_in_mask() {
        let all: KindSet = Kind::ALL.into_iter().collect();
        assert_eq!(all.len(), Kind::ALL.len());
    }
}
