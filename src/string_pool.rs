//! Per-document string interning.
//!
//! [§ 3.3](../index.html) "String pool: interns element tag names and
//! attribute local names per document."
//!
//! Interning keeps repeated tag/attribute names (there are usually only a
//! few dozen distinct ones in a document with thousands of elements) to a
//! single heap allocation, and gives `==` on names an early pointer-equal
//! exit. The pool is owned by a `Document` and consulted by `adopt`
//! (§4.6), which re-interns a moved subtree's names into the new
//! document's pool.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// An interned string: reference-counted so cloning an [`Atom`] is a
/// refcount bump, not a string copy.
pub type Atom = Rc<str>;

/// Interns strings for a single document.
///
/// Not thread-safe (this crate is single-threaded cooperative throughout,
/// §5); a `StringPool` never outlives its owning `Document`.
#[derive(Debug, Default)]
pub struct StringPool {
    atoms: RefCell<HashSet<Atom>>,
}

impl StringPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `s`, returning the pool's canonical [`Atom`] for it.
    ///
    /// If an equal string is already interned, its existing `Atom` is
    /// cloned (cheap); otherwise `s` is allocated once and kept.
    #[must_use]
    pub fn intern(&self, s: &str) -> Atom {
        if let Some(existing) = self.atoms.borrow().get(s) {
            return Rc::clone(existing);
        }
        let atom: Atom = Rc::from(s);
        let _ = self.atoms.borrow_mut().insert(Rc::clone(&atom));
        atom
    }

    /// Number of distinct strings currently interned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.borrow().len()
    }

    /// Whether the pool has interned anything yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_returns_equal_atoms() {
        let pool = StringPool::new();
        let a = pool.intern("div");
        let b = pool.intern("div");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn distinct_strings_get_distinct_atoms() {
        let pool = StringPool::new();
        let a = pool.intern("div");
        let b = pool.intern("span");
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(pool.len(), 2);
    }
}
