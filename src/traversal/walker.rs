//! `TreeWalker`: filtered, hierarchy-aware traversal — unlike
//! `NodeIterator`, a `Reject`ed node's whole subtree is pruned rather
//! than just the node itself. [§ 4.11](../index.html).

use std::cell::RefCell;

use super::filter::{NodeFilter, NodeFilterResult, WhatToShow};
use crate::node::Node;

/// A live, filtered, hierarchy-aware tree-order walk.
pub struct TreeWalker {
    root: Node,
    current: RefCell<Node>,
    what_to_show: WhatToShow,
    filter: Option<NodeFilter>,
}

impl TreeWalker {
    /// [§ 4.11 `create_tree_walker`](../index.html)
    #[must_use]
    pub fn new(root: Node, what_to_show: WhatToShow, filter: Option<NodeFilter>) -> Self {
        Self { current: RefCell::new(root.clone()), root, what_to_show, filter }
    }

    /// The walker's root.
    #[must_use]
    pub fn root(&self) -> Node {
        self.root.clone()
    }

    /// The node the walker is currently positioned on.
    #[must_use]
    pub fn current_node(&self) -> Node {
        self.current.borrow().clone()
    }

    /// Repositions the walker without filtering `node`. Per spec, the
    /// caller may set `current_node` to anything, even a node the
    /// filter would reject.
    pub fn set_current_node(&self, node: Node) {
        *self.current.borrow_mut() = node;
    }

    fn classify(&self, node: &Node) -> NodeFilterResult {
        if !self.what_to_show.allows(node.kind()) {
            return NodeFilterResult::Skip;
        }
        self.filter.as_ref().map_or(NodeFilterResult::Accept, |f| f(node))
    }

    /// [§ 4.11 `parent_node`](../index.html)
    pub fn parent_node(&self) -> Option<Node> {
        let mut node = self.current.borrow().clone();
        while node != self.root {
            let parent = node.parent()?;
            if self.classify(&parent) == NodeFilterResult::Accept {
                *self.current.borrow_mut() = parent.clone();
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    /// [§ 4.11 `first_child`](../index.html)
    pub fn first_child(&self) -> Option<Node> {
        self.traverse_children(true)
    }

    /// [§ 4.11 `last_child`](../index.html)
    pub fn last_child(&self) -> Option<Node> {
        self.traverse_children(false)
    }

    fn traverse_children(&self, forward: bool) -> Option<Node> {
        let start = self.current.borrow().clone();
        let mut node = if forward { start.first_child() } else { start.last_child() }?;
        loop {
            match self.classify(&node) {
                NodeFilterResult::Accept => {
                    *self.current.borrow_mut() = node.clone();
                    return Some(node);
                }
                NodeFilterResult::Skip => {
                    let child = if forward { node.first_child() } else { node.last_child() };
                    if let Some(child) = child {
                        node = child;
                        continue;
                    }
                }
                NodeFilterResult::Reject => {}
            }
            loop {
                let sibling = if forward { node.next_sibling() } else { node.previous_sibling() };
                if let Some(sibling) = sibling {
                    node = sibling;
                    break;
                }
                let parent = node.parent()?;
                if parent == start {
                    return None;
                }
                node = parent;
            }
        }
    }

    /// [§ 4.11 `next_sibling`](../index.html)
    pub fn next_sibling(&self) -> Option<Node> {
        self.traverse_sibling(true)
    }

    /// [§ 4.11 `previous_sibling`](../index.html)
    pub fn previous_sibling(&self) -> Option<Node> {
        self.traverse_sibling(false)
    }

    fn traverse_sibling(&self, forward: bool) -> Option<Node> {
        let mut node = self.current.borrow().clone();
        if node == self.root {
            return None;
        }
        loop {
            let mut candidate = if forward { node.next_sibling() } else { node.previous_sibling() };
            while candidate.is_none() {
                let parent = node.parent()?;
                if parent == self.root || self.classify(&parent) == NodeFilterResult::Accept {
                    return None;
                }
                node = parent;
                candidate = if forward { node.next_sibling() } else { node.previous_sibling() };
            }
            let mut candidate = candidate?;
            loop {
                match self.classify(&candidate) {
                    NodeFilterResult::Accept => {
                        *self.current.borrow_mut() = candidate.clone();
                        return Some(candidate);
                    }
                    NodeFilterResult::Reject => break,
                    NodeFilterResult::Skip => {
                        let child = if forward { candidate.first_child() } else { candidate.last_child() };
                        match child {
                            Some(child) => candidate = child,
                            None => break,
                        }
                    }
                }
            }
            node = candidate;
        }
    }

    fn step_forward(&self, node: &Node) -> Option<Node> {
        if self.classify(node) != NodeFilterResult::Reject {
            if let Some(child) = node.first_child() {
                return Some(child);
            }
        }
        let mut cursor = node.clone();
        loop {
            if cursor == self.root {
                return None;
            }
            if let Some(sibling) = cursor.next_sibling() {
                return Some(sibling);
            }
            cursor = cursor.parent()?;
            if cursor == self.root {
                return None;
            }
        }
    }

    /// [§ 4.11 `next_node`](../index.html): a flat walk that skips (does
    /// not descend into) a `Reject`ed node's subtree.
    pub fn next_node(&self) -> Option<Node> {
        let mut node = self.current.borrow().clone();
        while let Some(next) = self.step_forward(&node) {
            node = next;
            if self.classify(&node) == NodeFilterResult::Accept {
                *self.current.borrow_mut() = node.clone();
                return Some(node);
            }
        }
        None
    }

    fn step_backward(&self, node: &Node) -> Option<Node> {
        if *node == self.root {
            return None;
        }
        if let Some(prev) = node.previous_sibling() {
            let mut deepest = prev;
            loop {
                if self.classify(&deepest) == NodeFilterResult::Reject {
                    break;
                }
                match deepest.last_child() {
                    Some(last) => deepest = last,
                    None => break,
                }
            }
            return Some(deepest);
        }
        node.parent()
    }

    /// [§ 4.11 `previous_node`](../index.html)
    pub fn previous_node(&self) -> Option<Node> {
        let mut node = self.current.borrow().clone();
        while let Some(prev) = self.step_backward(&node) {
            node = prev;
            if self.classify(&node) == NodeFilterResult::Accept {
                *self.current.borrow_mut() = node.clone();
                return Some(node);
            }
        }
        None
    }
}
