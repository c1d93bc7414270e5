//! `NodeIterator`: a filtered, flat walk with a live reference node that
//! survives removal of the node it currently points at. [§ 4.11](../index.html).

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::filter::{NodeFilter, NodeFilterResult, WhatToShow};
use super::IteratorFixup;
use crate::node::Node;
use crate::tree::next_in_pre_order;

struct Inner {
    root: Node,
    reference: RefCell<Node>,
    pointer_before_reference: Cell<bool>,
    what_to_show: WhatToShow,
    filter: Option<NodeFilter>,
}

impl IteratorFixup for Inner {
    /// [§ 4.11 reference-node fixup](../index.html): a simplified form
    /// of the WHATWG algorithm. When the current reference is removed
    /// (or is inside the removed subtree), re-point the iterator at the
    /// removed node's previous sibling if it has one (continuing
    /// "forward" traversal from just before where the removed node was),
    /// or its parent otherwise.
    fn notify_removed(&self, removed: &Node) {
        let mut reference = self.reference.borrow_mut();
        if !is_inclusive_ancestor_of_or_equal(removed, &reference) {
            return;
        }
        if let Some(prev) = removed.previous_sibling() {
            *reference = prev;
            self.pointer_before_reference.set(false);
        } else if let Some(parent) = removed.parent() {
            *reference = parent;
            self.pointer_before_reference.set(true);
        }
    }
}

fn is_inclusive_ancestor_of_or_equal(ancestor: &Node, node: &Node) -> bool {
    crate::tree::contains(ancestor, node)
}

/// A live, filtered, flat (non-hierarchical) tree-order walk.
#[derive(Clone)]
pub struct NodeIterator(Rc<Inner>);

impl NodeIterator {
    /// [§ 4.11 `create_node_iterator`](../index.html)
    #[must_use]
    pub fn new(root: Node, what_to_show: WhatToShow, filter: Option<NodeFilter>) -> Self {
        let inner = Rc::new(Inner {
            root: root.clone(),
            reference: RefCell::new(root.clone()),
            pointer_before_reference: Cell::new(true),
            what_to_show,
            filter,
        });
        if let Some(document) = root.owner_document() {
            let weak: Weak<dyn IteratorFixup> = Rc::downgrade(&inner);
            crate::node::register_iterator(&document, weak);
        }
        Self(inner)
    }

    /// The iterator's root (the boundary traversal never steps outside
    /// of).
    #[must_use]
    pub fn root(&self) -> Node {
        self.0.root.clone()
    }

    fn accepts(&self, node: &Node) -> NodeFilterResult {
        if !self.0.what_to_show.allows(node.kind()) {
            return NodeFilterResult::Skip;
        }
        self.0.filter.as_ref().map_or(NodeFilterResult::Accept, |f| f(node))
    }

    /// [§ 4.11 `next_node`](../index.html)
    pub fn next_node(&self) -> Option<Node> {
        let mut node = self.0.reference.borrow().clone();
        let mut before_reference = self.0.pointer_before_reference.get();
        loop {
            if before_reference {
                before_reference = false;
            } else {
                node = next_in_pre_order(&node, &self.0.root)?;
            }
            if self.accepts(&node) == NodeFilterResult::Accept {
                *self.0.reference.borrow_mut() = node.clone();
                self.0.pointer_before_reference.set(false);
                return Some(node);
            }
        }
    }

    /// [§ 4.11 `previous_node`](../index.html)
    pub fn previous_node(&self) -> Option<Node> {
        let mut node = self.0.reference.borrow().clone();
        let mut before_reference = self.0.pointer_before_reference.get();
        loop {
            if !before_reference {
                before_reference = true;
            } else {
                node = previous_in_tree_order(&node, &self.0.root)?;
            }
            if self.accepts(&node) == NodeFilterResult::Accept {
                *self.0.reference.borrow_mut() = node.clone();
                self.0.pointer_before_reference.set(true);
                return Some(node);
            }
        }
    }
}

fn previous_in_tree_order(from: &Node, root: &Node) -> Option<Node> {
    if from == root {
        return None;
    }
    if let Some(prev_sibling) = from.previous_sibling() {
        let mut deepest = prev_sibling;
        while let Some(last) = deepest.last_child() {
            deepest = last;
        }
        return Some(deepest);
    }
    from.parent()
}
