//! String interning for identifier deduplication.
//!
//! Identifiers repeat heavily in Java sources (parameter names, type names,
//! `this`, `String`, ...). The arena stores an `Atom` per identifier node and
//! resolves it back through the owning `Interner`, so equal names compare as
//! a `u32` instead of a string.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle to an interned string.
///
/// Only meaningful together with the `Interner` that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom(pub u32);

impl Atom {
    /// Sentinel for "no atom" (e.g. a synthetic node without a name).
    pub const NONE: Atom = Atom(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Append-only string interner.
///
/// `intern` deduplicates; `resolve` is a plain index into the backing store,
/// so resolved `&str`s borrow from the interner and stay valid as long as it
/// lives (the store is never shrunk or mutated in place).
#[derive(Debug, Default, Clone)]
pub struct Interner {
    map: FxHashMap<String, u32>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Interner {
        Interner::default()
    }

    /// Intern a string, returning the atom for it.
    /// Repeated calls with the same text return the same atom.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&id) = self.map.get(text) {
            return Atom(id);
        }
        let id = self.strings.len() as u32;
        self.strings.push(text.to_string());
        self.map.insert(text.to_string(), id);
        Atom(id)
    }

    /// Resolve an atom back to its text.
    ///
    /// # Panics
    /// Panics if the atom is `Atom::NONE` or came from a different interner
    /// with a larger store. Atoms are only produced by `intern`, so a valid
    /// atom from this interner always resolves.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }

    /// Resolve an atom, returning `None` for `Atom::NONE` or out-of-range ids.
    #[inline]
    pub fn try_resolve(&self, atom: Atom) -> Option<&str> {
        if atom.is_none() {
            return None;
        }
        self.strings.get(atom.0 as usize).map(String::as_str)
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_deduplicates() {
        let mut interner = Interner::new();
        let a = interner.intern("value");
        let b = interner.intern("value");
        let c = interner.intern("other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let atom = interner.intern("arg0");
        assert_eq!(interner.resolve(atom), "arg0");
        assert_eq!(interner.try_resolve(atom), Some("arg0"));
    }

    #[test]
    fn none_atom_does_not_resolve() {
        let interner = Interner::new();
        assert_eq!(interner.try_resolve(Atom::NONE), None);
        assert!(Atom::NONE.is_none());
    }
}
