//! Interned identifiers for module, port and type names.

use lasso::Rodeo;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// An interned name from an HDL source file.
///
/// Two `Ident`s from the same [`Interner`] are equal exactly when their
/// strings are equal, so symbol tables can key on them directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

// SAFETY: `try_from_usize` only produces values that fit in `u32`, and
// `into_usize` widens losslessly on every supported platform.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Single-threaded string interner backed by [`lasso::Rodeo`].
///
/// The generator runs one file through one thread, so the interner uses
/// interior mutability instead of a locking rodeo. Resolved strings are
/// returned owned because the rodeo may grow while callers hold them.
pub struct Interner {
    rodeo: RefCell<Rodeo<Ident>>,
}

impl Interner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: RefCell::new(Rodeo::new()),
        }
    }

    /// Interns `s`, returning the existing identifier if already present.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.rodeo.borrow_mut().get_or_intern(s)
    }

    /// Looks up `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.rodeo.borrow().get(s)
    }

    /// Resolves an [`Ident`] back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the `Ident` was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> String {
        self.rodeo.borrow().resolve(&ident).to_string()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_resolve_roundtrip() {
        let interner = Interner::new();
        let id = interner.get_or_intern("sum");
        assert_eq!(interner.resolve(id), "sum");
    }

    #[test]
    fn same_name_same_ident() {
        let interner = Interner::new();
        assert_eq!(interner.get_or_intern("clk"), interner.get_or_intern("clk"));
        assert_ne!(interner.get_or_intern("a"), interner.get_or_intern("b"));
    }

    #[test]
    fn get_does_not_intern() {
        let interner = Interner::new();
        assert_eq!(interner.get("missing"), None);
        let id = interner.get_or_intern("present");
        assert_eq!(interner.get("present"), Some(id));
    }

    #[test]
    fn serde_roundtrip() {
        let id = Ident(7);
        let json = serde_json::to_string(&id).unwrap();
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
