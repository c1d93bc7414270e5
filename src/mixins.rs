//! The `ChildNode` and `ParentNode` mixin operations. [§ 4.2](../index.html).
//!
//! WHATWG spells these out as mixins applied to `Element`, `CharacterData`,
//! and `DocumentType` (`ChildNode`) and to `Document`, `DocumentFragment`,
//! and `Element` (`ParentNode`). This crate has one `Node` type for every
//! kind (§3.2's sum-type design), so these are plain functions taking a
//! `&Node`; callers that only want them exposed on the kinds WHATWG
//! allows are expected to gate at their own API surface.

use crate::collections::HTMLCollection;
use crate::error::DomError;
use crate::node::{Node, NodeKind};

/// A single item accepted by the `(Node or DOMString)...` union these
/// mixin methods take: either an existing node, or a string that is
/// converted to a new `Text` node owned by the same document as the
/// context object.
pub enum NodeOrString {
    /// An existing node, inserted as-is.
    Node(Node),
    /// A string, converted to a fresh `Text` node.
    Text(String),
}

/// [§ 4.2 "converting nodes into a node"](../index.html): a single item
/// is used directly (after string conversion); more than one is wrapped
/// in a fresh `DocumentFragment` so the caller has one node to insert.
fn resolve(document: &Node, items: Vec<NodeOrString>) -> Node {
    if items.len() == 1 {
        return match items.into_iter().next().unwrap() {
            NodeOrString::Node(node) => node,
            NodeOrString::Text(text) => crate::node::new_text(document, &text),
        };
    }
    let fragment = crate::node::new_document_fragment(document);
    for item in items {
        let node = match item {
            NodeOrString::Node(node) => node,
            NodeOrString::Text(text) => crate::node::new_text(document, &text),
        };
        crate::mutation::append(&fragment, &node).expect("a fresh fragment accepts any node");
    }
    fragment
}

fn owner_document_of(node: &Node) -> Node {
    node.owner_document().unwrap_or_else(|| node.clone())
}

/// [§ 4.2 `ChildNode::before(nodes)`](../index.html)
pub fn before(node: &Node, nodes: Vec<NodeOrString>) -> Result<(), DomError> {
    let Some(parent) = node.parent() else { return Ok(()) };
    let document = owner_document_of(node);
    let viable_previous = first_preceding_non_moving(node, &nodes);
    let to_insert = resolve(&document, nodes);
    let reference = match viable_previous {
        Some(p) => p.next_sibling(),
        None => parent.first_child(),
    };
    crate::mutation::pre_insert(&to_insert, &parent, reference.as_ref())?;
    Ok(())
}

/// [§ 4.2 `ChildNode::after(nodes)`](../index.html)
pub fn after(node: &Node, nodes: Vec<NodeOrString>) -> Result<(), DomError> {
    let Some(parent) = node.parent() else { return Ok(()) };
    let document = owner_document_of(node);
    let viable_next = first_following_non_moving(node, &nodes);
    let to_insert = resolve(&document, nodes);
    crate::mutation::pre_insert(&to_insert, &parent, viable_next.as_ref())?;
    Ok(())
}

/// [§ 4.2 `ChildNode::replace_with(nodes)`](../index.html)
pub fn replace_with(node: &Node, nodes: Vec<NodeOrString>) -> Result<(), DomError> {
    let Some(parent) = node.parent() else { return Ok(()) };
    let document = owner_document_of(node);
    let viable_next = first_following_non_moving(node, &nodes);
    let to_insert = resolve(&document, nodes);
    if node.parent().as_ref() == Some(&parent) {
        crate::mutation::replace(&to_insert, &parent, node)?;
    } else {
        crate::mutation::pre_insert(&to_insert, &parent, viable_next.as_ref())?;
    }
    Ok(())
}

/// [§ 4.2 `ChildNode::remove()`](../index.html)
pub fn remove(node: &Node) -> Result<(), DomError> {
    let Some(parent) = node.parent() else { return Ok(()) };
    crate::mutation::remove_child(&parent, node)?;
    Ok(())
}

/// [§ 6.1 `ChildNode::previous_element_sibling`](../index.html)
#[must_use]
pub fn previous_element_sibling(node: &Node) -> Option<Node> {
    let mut cursor = node.previous_sibling();
    while let Some(sibling) = cursor {
        if sibling.kind() == NodeKind::Element {
            return Some(sibling);
        }
        cursor = sibling.previous_sibling();
    }
    None
}

/// [§ 6.1 `ChildNode::next_element_sibling`](../index.html)
#[must_use]
pub fn next_element_sibling(node: &Node) -> Option<Node> {
    let mut cursor = node.next_sibling();
    while let Some(sibling) = cursor {
        if sibling.kind() == NodeKind::Element {
            return Some(sibling);
        }
        cursor = sibling.next_sibling();
    }
    None
}

fn contains_node(nodes: &[NodeOrString], target: &Node) -> bool {
    nodes.iter().any(|n| matches!(n, NodeOrString::Node(n) if n == target))
}

fn first_preceding_non_moving(node: &Node, nodes: &[NodeOrString]) -> Option<Node> {
    let mut cursor = node.previous_sibling();
    while let Some(candidate) = cursor {
        if !contains_node(nodes, &candidate) {
            return Some(candidate);
        }
        cursor = candidate.previous_sibling();
    }
    None
}

fn first_following_non_moving(node: &Node, nodes: &[NodeOrString]) -> Option<Node> {
    let mut cursor = node.next_sibling();
    while let Some(candidate) = cursor {
        if !contains_node(nodes, &candidate) {
            return Some(candidate);
        }
        cursor = candidate.next_sibling();
    }
    None
}

/// [§ 4.2 `ParentNode::prepend(nodes)`](../index.html)
pub fn prepend(parent: &Node, nodes: Vec<NodeOrString>) -> Result<(), DomError> {
    let document = owner_document_of(parent);
    let to_insert = resolve(&document, nodes);
    crate::mutation::pre_insert(&to_insert, parent, parent.first_child().as_ref())?;
    Ok(())
}

/// [§ 4.2 `ParentNode::append(nodes)`](../index.html)
pub fn append(parent: &Node, nodes: Vec<NodeOrString>) -> Result<(), DomError> {
    let document = owner_document_of(parent);
    let to_insert = resolve(&document, nodes);
    crate::mutation::append(parent, &to_insert)?;
    Ok(())
}

/// [§ 4.2 `ParentNode::replace_children(nodes)`](../index.html)
pub fn replace_children(parent: &Node, nodes: Vec<NodeOrString>) -> Result<(), DomError> {
    let document = owner_document_of(parent);
    let to_insert = resolve(&document, nodes);
    crate::validation::ensure_pre_insertion_validity(&to_insert, parent, None)?;
    for child in parent.children().collect::<Vec<_>>() {
        crate::mutation::remove_child(parent, &child)?;
    }
    crate::mutation::append(parent, &to_insert)?;
    Ok(())
}

/// [§ 6.1 `ParentNode::children`](../index.html): a live view over
/// `parent`'s own element children (not the full descendant subtree).
#[must_use]
pub fn children(parent: &Node) -> HTMLCollection {
    HTMLCollection::direct_children(parent.clone())
}

/// [§ 6.1 `ParentNode::child_element_count`](../index.html)
#[must_use]
pub fn child_element_count(parent: &Node) -> usize {
    parent.children().filter(|c| c.kind() == NodeKind::Element).count()
}

/// [§ 6.1 `ParentNode::first_element_child`](../index.html)
#[must_use]
pub fn first_element_child(parent: &Node) -> Option<Node> {
    parent.children().find(|c| c.kind() == NodeKind::Element)
}

/// [§ 6.1 `ParentNode::last_element_child`](../index.html)
#[must_use]
pub fn last_element_child(parent: &Node) -> Option<Node> {
    parent.children().filter(|c| c.kind() == NodeKind::Element).last()
}

/// `moveBefore`: relocates `node` to before `child` under `parent`
/// (possibly a new parent, within the same document) without ever
/// detaching it (no intervening "disconnected" state, so live range/
/// selection-style state anchored to it is not disturbed the way
/// `insertBefore(node.remove())` would disturb it).
pub fn move_before(parent: &Node, node: &Node, child: Option<&Node>) -> Result<(), DomError> {
    if node.kind() != NodeKind::Element
        && node.kind() != NodeKind::Text
        && node.kind() != NodeKind::Comment
        && node.kind() != NodeKind::CDataSection
    {
        return Err(DomError::HierarchyRequestError);
    }
    crate::validation::ensure_pre_insertion_validity(node, parent, child)?;
    if node.owner_document() != parent.owner_document() {
        return Err(DomError::HierarchyRequestError);
    }
    crate::mutation::perform_move(node, parent, child);
    Ok(())
}
