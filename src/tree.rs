//! Tree-order relationships: ancestry, containment, and document position.
//!
//! [§ 4.4 Tree order and relationships](../index.html)

use crate::node::Node;

/// [§ 4.4 `contains(other)`](../index.html): whether `other` is `self` or
/// a descendant of `self`. O(depth of `other`).
#[must_use]
pub fn contains(ancestor: &Node, other: &Node) -> bool {
    let mut cursor = Some(other.clone());
    while let Some(node) = cursor {
        if &node == ancestor {
            return true;
        }
        cursor = node.parent();
    }
    false
}

/// Bitmask returned by [`compare_document_position`], matching the
/// WHATWG `DOCUMENT_POSITION_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentPosition(u16);

impl DocumentPosition {
    /// The two nodes are not in the same tree.
    pub const DISCONNECTED: u16 = 0x01;
    /// `other` precedes `self` in tree order.
    pub const PRECEDING: u16 = 0x02;
    /// `other` follows `self` in tree order.
    pub const FOLLOWING: u16 = 0x04;
    /// `other` contains `self`.
    pub const CONTAINS: u16 = 0x08;
    /// `other` is contained by `self`.
    pub const CONTAINED_BY: u16 = 0x10;
    /// Implementation-specific ordering (disconnected trees); always set
    /// alongside `DISCONNECTED` here, per spec.
    pub const IMPLEMENTATION_SPECIFIC: u16 = 0x20;

    /// The raw bitmask value.
    #[must_use]
    pub fn bits(self) -> u16 {
        self.0
    }
}

/// [§ 4.4 `compare_document_position(other)`](../index.html)
#[must_use]
pub fn compare_document_position(node: &Node, other: &Node) -> DocumentPosition {
    if node == other {
        return DocumentPosition(0);
    }
    let node_root = root_of(node);
    let other_root = root_of(other);
    if node_root != other_root {
        // Disconnected trees: order is implementation-specific but must
        // be consistent. We break ties by the pointer address of the
        // root's allocation so the ordering is stable for a given run.
        let flags = if node.identity() < other.identity() {
            DocumentPosition::PRECEDING
        } else {
            DocumentPosition::FOLLOWING
        };
        return DocumentPosition(
            DocumentPosition::DISCONNECTED | DocumentPosition::IMPLEMENTATION_SPECIFIC | flags,
        );
    }
    if contains(node, other) {
        return DocumentPosition(DocumentPosition::CONTAINED_BY | DocumentPosition::FOLLOWING);
    }
    if contains(other, node) {
        return DocumentPosition(DocumentPosition::CONTAINS | DocumentPosition::PRECEDING);
    }
    if preceding_in_tree_order(node, other) {
        DocumentPosition(DocumentPosition::FOLLOWING)
    } else {
        DocumentPosition(DocumentPosition::PRECEDING)
    }
}

/// The furthest ancestor of `node` (itself if it has no parent).
#[must_use]
pub fn root_of(node: &Node) -> Node {
    let mut cursor = node.clone();
    while let Some(parent) = cursor.parent() {
        cursor = parent;
    }
    cursor
}

/// True if `node` comes before `other` in tree order (pre-order, depth
/// first), given both are in the same tree and neither contains the
/// other. Walks up each side to the lowest common ancestor's children and
/// compares sibling position there.
fn preceding_in_tree_order(node: &Node, other: &Node) -> bool {
    let node_chain = ancestor_chain(node);
    let other_chain = ancestor_chain(other);
    let mut node_iter = node_chain.iter().rev();
    let mut other_iter = other_chain.iter().rev();
    let mut last_common: Option<&Node> = None;
    loop {
        match (node_iter.next(), other_iter.next()) {
            (Some(a), Some(b)) if a == b => last_common = Some(a),
            (Some(a), Some(b)) => {
                let common = last_common.expect("same root guarantees a common ancestor");
                return index_among_children(common, a) < index_among_children(common, b);
            }
            _ => return false,
        }
    }
}

fn ancestor_chain(node: &Node) -> Vec<Node> {
    let mut chain = vec![node.clone()];
    let mut cursor = node.clone();
    while let Some(parent) = cursor.parent() {
        chain.push(parent.clone());
        cursor = parent;
    }
    chain
}

fn index_among_children(parent: &Node, child: &Node) -> usize {
    parent
        .children()
        .position(|c| &c == child)
        .expect("child is always found among its own parent's children")
}

/// Pre-order (document-order) iterator over `node` and all of its
/// descendants, used by tree-order traversal (`NodeIterator`/`TreeWalker`
/// build on this shape directly, with their own filtering).
pub struct PreOrderIter {
    root: Node,
    current: Option<Node>,
}

/// Starts a pre-order walk at `node` (inclusive).
#[must_use]
pub fn pre_order(node: &Node) -> PreOrderIter {
    PreOrderIter { root: node.clone(), current: Some(node.clone()) }
}

impl Iterator for PreOrderIter {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let current = self.current.take()?;
        self.current = next_in_pre_order(&current, &self.root);
        Some(current)
    }
}

/// The next node after `from` in pre-order, stopping at `boundary`
/// (exclusive — never steps outside `boundary`'s subtree).
pub(crate) fn next_in_pre_order(from: &Node, boundary: &Node) -> Option<Node> {
    if let Some(child) = from.first_child() {
        return Some(child);
    }
    let mut cursor = from.clone();
    loop {
        if &cursor == boundary {
            return None;
        }
        if let Some(sibling) = cursor.next_sibling() {
            return Some(sibling);
        }
        cursor = cursor.parent()?;
    }
}
