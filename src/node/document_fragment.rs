//! `DocumentFragment` and `ShadowRoot` payloads.
//!
//! A `DocumentFragment`'s children use the same sibling-linked list as
//! every other node; no separate fragment-local storage is needed. Both
//! payloads below are therefore thin — the child list itself lives in
//! the shared [`super::NodeRepr`] fields every node kind carries.

use crate::node::{Node, NodeKind, NodeSpecific, WeakNode};

/// The kind-specific state of a `DocumentFragment` node. Carries nothing
/// of its own; present so `NodeSpecific::DocumentFragment` has a distinct
/// payload type to match on.
#[derive(Clone, Copy, Default)]
pub struct DocumentFragmentData;

/// Builds a detached `DocumentFragment` node owned by `document`, used
/// internally by the `ParentNode`/`ChildNode` mixin operations to batch
/// multiple `(Node or DOMString)` arguments into a single insertion, and
/// exposed publicly as `Document::create_document_fragment`.
#[must_use]
pub fn new_document_fragment(document: &Node) -> Node {
    let node = Node::new_raw(NodeKind::DocumentFragment, NodeSpecific::DocumentFragment(DocumentFragmentData));
    node.set_owner_document(Some(document));
    node
}

/// Which shadow tree encapsulation mode a `ShadowRoot` was attached with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRootMode {
    /// `element.shadowRoot` (and equivalents) are reachable from outside.
    Open,
    /// The shadow root is only reachable from code holding the handle
    /// returned at attach time.
    Closed,
}

/// The kind-specific state of a `ShadowRoot` node.
///
/// A shadow root is structurally its own tree root (its `parent()` is
/// always `None`); [`host`](Self::host) is the separate, non-tree link
/// back to the element it is attached to. This crate implements the tree
/// bookkeeping only — shadow-tree rendering/slot-assignment semantics are
/// explicitly out of scope.
#[derive(Clone)]
pub struct ShadowRootData {
    /// The element this shadow root is attached to.
    pub host: WeakNode,
    /// The encapsulation mode chosen at attach time.
    pub mode: ShadowRootMode,
}
