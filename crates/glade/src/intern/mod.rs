//! # String Interning
//!
//! Non-terminal names are interned once per grammar and handled as small
//! copyable keys afterwards. Interning gives `O(1)` comparison and keeps
//! every hot structure (items, productions, forest nodes) free of owned
//! strings.

use lasso::{Rodeo, Spur};
use std::fmt;

/// An interned non-terminal name.
///
/// `NtName` is a lightweight handle into the grammar's [`Interner`]. It can
/// be cheaply copied, compared and hashed; use [`Interner::resolve`] to get
/// the name back.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NtName(Spur);

impl NtName {
    pub(crate) const fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    /// Resolve this name using the given interner.
    #[must_use]
    pub fn resolve<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve(*self)
    }
}

impl fmt::Debug for NtName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NtName({:?})", self.0)
    }
}

/// Interner for non-terminal names.
///
/// Owned by a single grammar. Interning the same name twice returns the
/// same key.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    rodeo: Rodeo,
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    /// Intern a name, returning its key. Returns the existing key if the
    /// name has been interned before.
    pub fn intern(&mut self, name: &str) -> NtName {
        NtName(self.rodeo.get_or_intern(name))
    }

    /// Look up the key for a name without interning it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NtName> {
        self.rodeo.get(name).map(NtName)
    }

    /// Resolve a key back to the name it was interned from.
    ///
    /// # Panics
    ///
    /// Panics if the key comes from a different interner.
    #[must_use]
    pub fn resolve(&self, name: NtName) -> &str {
        self.rodeo.resolve(&name.0)
    }

    /// Number of distinct interned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_dedupes() {
        let mut interner = Interner::new();
        let a = interner.intern("Expr");
        let b = interner.intern("Expr");
        let c = interner.intern("Term");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn resolve_round_trip() {
        let mut interner = Interner::new();
        let key = interner.intern("Stmt");
        assert_eq!(interner.resolve(key), "Stmt");
        assert_eq!(key.resolve(&interner), "Stmt");
    }

    #[test]
    fn get_does_not_intern() {
        let mut interner = Interner::new();
        assert!(interner.get("Expr").is_none());
        let key = interner.intern("Expr");
        assert_eq!(interner.get("Expr"), Some(key));
        assert_eq!(interner.len(), 1);
    }
}
