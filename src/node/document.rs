//! `Document` payload: the string pool, document metadata, and lazy
//! accessors for `document_element`/`head`/`body`.
//!
//! Rather than caching `document_element`/`head`/`body` pointers that
//! would need invalidating on every mutation, they are resolved on
//! demand by scanning the child list — O(children), and children counts
//! for a `Document` are always small (a handful of top-level nodes), so
//! this is cheaper in practice than keeping cached pointers consistent
//! through every splice.

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use crate::node::{Node, NodeKind, NodeSpecific};
use crate::string_pool::{Atom, StringPool};
use crate::traversal::IteratorFixup;

/// Which quirks mode a document is rendered in. Carried for API parity
/// with the DOM (`document.compatMode`); this crate does no rendering
/// and does not interpret the mode itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatMode {
    /// `CSS1Compat` — standards mode.
    #[default]
    NoQuirks,
    /// `BackCompat` — quirks mode.
    Quirks,
    /// Limited quirks (`<!DOCTYPE html>` with certain public IDs).
    LimitedQuirks,
}

/// The kind-specific state of a `Document` node.
pub struct DocumentData {
    pool: StringPool,
    url: String,
    content_type: String,
    compat_mode: CompatMode,
    /// Tracks "external references keeping a subtree alive" (§3.4) as an
    /// informational counter layered on top of `Rc`'s real strong count,
    /// for callers that want to query it without walking the tree
    /// (`Document::external_reference_count`).
    external_refs: Cell<usize>,
    /// Active `NodeIterator`s rooted somewhere in this document, so a
    /// removal can fix up their reference node in place (§4.11).
    active_iterators: RefCell<Vec<Weak<dyn IteratorFixup>>>,
}

impl DocumentData {
    /// Creates a document payload with the given URL and content type
    /// (e.g. `"about:blank"`, `"application/xml"`).
    #[must_use]
    pub fn new(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            pool: StringPool::new(),
            url: url.into(),
            content_type: content_type.into(),
            compat_mode: CompatMode::NoQuirks,
            external_refs: Cell::new(0),
            active_iterators: RefCell::new(Vec::new()),
        }
    }

    /// The document's URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The document's content type, e.g. `text/html` or `application/xml`.
    /// [§ 4.12](../index.html): selector matching's case-sensitivity for
    /// tag names depends on this being `text/html` vs. an XML type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Whether this document's content type identifies it as HTML, which
    /// governs case-insensitive tag-name matching (§4.12).
    #[must_use]
    pub fn is_html_document(&self) -> bool {
        self.content_type.eq_ignore_ascii_case("text/html")
    }

    /// The document's quirks mode.
    #[must_use]
    pub fn compat_mode(&self) -> CompatMode {
        self.compat_mode
    }

    pub(crate) fn set_compat_mode(&mut self, mode: CompatMode) {
        self.compat_mode = mode;
    }

    /// Current value of the informational external-reference counter.
    #[must_use]
    pub fn external_reference_count(&self) -> usize {
        self.external_refs.get()
    }

    pub(crate) fn bump_external_refs(&self, delta: i64) {
        let current = self.external_refs.get() as i64;
        self.external_refs.set((current + delta).max(0) as usize);
    }

    pub(crate) fn shallow_clone(&self) -> Self {
        Self::new(self.url.clone(), self.content_type.clone())
    }

    /// The document's string pool, for factory operations
    /// (`create_element`, `create_attribute`, ...) that need to intern
    /// names before a `Node` even exists to call [`intern_in`] on.
    pub(crate) fn pool(&self) -> &StringPool {
        &self.pool
    }
}

/// Builds a fresh, empty document node.
#[must_use]
pub fn new_document(url: impl Into<String>, content_type: impl Into<String>) -> Node {
    Node::new_raw(NodeKind::Document, NodeSpecific::Document(DocumentData::new(url, content_type)))
}

/// Interns `s` into `document`'s string pool.
///
/// # Panics
/// Panics if `document` is not a `Document` node; every call site in
/// this crate only ever passes an actual owner document.
#[must_use]
pub fn intern_in(document: &Node, s: &str) -> Atom {
    document.with_specific(|specific| match specific {
        NodeSpecific::Document(data) => data.pool.intern(s),
        _ => unreachable!("intern_in called with a non-Document node"),
    })
}

/// [§ 4.4 `document_element`](../index.html): the document's single root
/// element child, if present.
#[must_use]
pub fn document_element(document: &Node) -> Option<Node> {
    document.children().find(|child| child.kind() == NodeKind::Element)
}

/// The `<head>` element, found by local name among `document_element`'s
/// children. Returns `None` outside an HTML document structure.
#[must_use]
pub fn head(document: &Node) -> Option<Node> {
    find_html_child(document, "head")
}

/// The `<body>` element, found the same way as [`head`].
#[must_use]
pub fn body(document: &Node) -> Option<Node> {
    find_html_child(document, "body")
}

/// Registers a [`IteratorFixup`] handle so it is notified when a node in
/// this document is removed.
pub(crate) fn register_iterator(document: &Node, handle: Weak<dyn IteratorFixup>) {
    document.with_specific(|specific| {
        if let NodeSpecific::Document(data) = specific {
            data.active_iterators.borrow_mut().push(handle);
        }
    });
}

/// Notifies every still-alive registered iterator that `removed` has
/// just been detached from the tree, and drops dead registrations.
pub(crate) fn notify_iterators_removed(document: &Node, removed: &Node) {
    document.with_specific(|specific| {
        let NodeSpecific::Document(data) = specific else { return };
        data.active_iterators.borrow_mut().retain(|w| w.strong_count() > 0);
        let handles: Vec<_> = data.active_iterators.borrow().iter().filter_map(Weak::upgrade).collect();
        for handle in handles {
            handle.notify_removed(removed);
        }
    });
}

/// [§ 6.1 `Document::get_element_by_id(id)`](../index.html): the first
/// element in tree order under `document` whose `id` attribute equals
/// `id`.
#[must_use]
pub fn get_element_by_id(document: &Node, id: &str) -> Option<Node> {
    if id.is_empty() {
        return None;
    }
    crate::tree::pre_order(document).skip(1).find(|node| {
        node.with_specific(|specific| match specific {
            NodeSpecific::Element(e) => e.id() == Some(id),
            _ => false,
        })
    })
}

fn find_html_child(document: &Node, local_name: &str) -> Option<Node> {
    let root = document_element(document)?;
    root.children().find(|child| {
        child.with_specific(|specific| match specific {
            NodeSpecific::Element(e) => e.local_name().eq_ignore_ascii_case(local_name),
            _ => false,
        })
    })
}
