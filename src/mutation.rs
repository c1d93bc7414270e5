//! The mutation engine: insert, adopt, remove, replace, and the
//! `moveBefore` same-document relocation. [§ 4.2](../index.html).
//!
//! Every public entry point here validates first and mutates second —
//! "no operation partially applies a mutation and then returns an
//! error" (§7). Mutation-record emission (§4.13) is layered on top of
//! the low-level splice primitives so observers see one record per
//! logical operation, not per pointer update.

use crate::error::DomError;
use crate::node::{Node, NodeKind, NodeSpecific};
use crate::observer::{self, MutationRecordKind};
use crate::validation;

/// [§ 4.2 `insert(node, parent, child, suppress_observers)`](../index.html)
///
/// Splices `node` (or, if it is a `DocumentFragment`, each of its
/// children in order) into `parent`'s child list directly before `child`
/// (or at the end, if `child` is `None`). Does not validate — callers go
/// through [`pre_insert`]/[`replace`] which call
/// [`validation::ensure_pre_insertion_validity`] first.
fn insert(node: &Node, parent: &Node, child: Option<&Node>, suppress_observers: bool) {
    let nodes: Vec<Node> = if node.kind() == NodeKind::DocumentFragment {
        node.children().collect()
    } else {
        vec![node.clone()]
    };

    for n in &nodes {
        // §4.2 step 4 / §5: a node already connected elsewhere gets a
        // pre-remove record against its old parent before the insert
        // record on the new one, so an observer never sees it appear in
        // two places at once.
        if let Some(old_parent) = n.parent() {
            if !suppress_observers {
                observer::record_mutation(&old_parent, MutationRecordKind::ChildListRemove { removed: n.clone() });
            }
            if let Some(document) = n.owner_document() {
                crate::node::notify_iterators_removed(&document, n);
            }
            splice_out(n);
        }
        adopt(n, parent.owner_document().as_ref().unwrap_or(parent));
        splice_in(n, parent, child);
        if !suppress_observers {
            observer::record_mutation(parent, MutationRecordKind::ChildListAdd { added: n.clone() });
        }
    }
}

/// `moveBefore`: relocates an already-connected `node` to before `child`
/// under `parent`, with no intervening detached state and a single
/// `ChildListMove` record — unlike [`insert`], never routes through
/// remove-then-insert bookkeeping.
pub(crate) fn perform_move(node: &Node, parent: &Node, child: Option<&Node>) {
    let reference = match child {
        Some(child) if child == node => node.next_sibling(),
        Some(child) => Some(child.clone()),
        None => None,
    };
    splice_out(node);
    splice_in(node, parent, reference.as_ref());
    observer::record_mutation(parent, MutationRecordKind::ChildListMove { moved: node.clone() });
}

/// Detaches `node` from whatever parent/siblings it currently has,
/// without adopting it anywhere. A no-op if it is already detached.
fn splice_out(node: &Node) {
    let Some(parent) = node.parent() else { return };
    let prev = node.previous_sibling();
    let next = node.next_sibling();

    match &prev {
        Some(p) => p.set_next_sibling(next.clone()),
        None => parent.set_first_child(next.clone()),
    }
    match &next {
        Some(n) => n.set_previous_sibling(prev.as_ref()),
        None => parent.set_last_child(prev.as_ref()),
    }
    node.set_parent(None);
    node.set_previous_sibling(None);
    node.set_next_sibling(None);
    #[cfg(feature = "bloom-filter")]
    crate::selector::bloom::on_detach(node);
}

/// Splices `node` (already detached) into `parent`'s child list directly
/// before `before` (or appends it if `before` is `None`).
fn splice_in(node: &Node, parent: &Node, before: Option<&Node>) {
    match before {
        Some(before) => {
            let prev = before.previous_sibling();
            node.set_next_sibling(Some(before.clone()));
            before.set_previous_sibling(Some(node));
            match &prev {
                Some(p) => {
                    p.set_next_sibling(Some(node.clone()));
                    node.set_previous_sibling(Some(p));
                }
                None => {
                    parent.set_first_child(Some(node.clone()));
                    node.set_previous_sibling(None);
                }
            }
        }
        None => {
            let last = parent.last_child();
            match &last {
                Some(l) => {
                    l.set_next_sibling(Some(node.clone()));
                    node.set_previous_sibling(Some(l));
                }
                None => {
                    parent.set_first_child(Some(node.clone()));
                    node.set_previous_sibling(None);
                }
            }
            parent.set_last_child(Some(node));
            node.set_next_sibling(None);
        }
    }
    node.set_parent(Some(parent));
    #[cfg(feature = "bloom-filter")]
    crate::selector::bloom::on_attach(node, parent);
}

/// [§ 4.2 `pre_insert(node, parent, child)`](../index.html): validate
/// then [`insert`].
pub fn pre_insert(node: &Node, parent: &Node, child: Option<&Node>) -> Result<Node, DomError> {
    validation::ensure_pre_insertion_validity(node, parent, child)?;
    let reference = if let Some(child) = child {
        if child == node { node.next_sibling() } else { Some(child.clone()) }
    } else {
        None
    };
    insert(node, parent, reference.as_ref(), false);
    Ok(node.clone())
}

/// `parent.append_child(node)` (§4.2): `pre_insert` with no reference
/// child.
pub fn append(parent: &Node, node: &Node) -> Result<Node, DomError> {
    pre_insert(node, parent, None)
}

/// [§ 4.2 `replace(node, parent, child)`](../index.html)
pub fn replace(node: &Node, parent: &Node, child: &Node) -> Result<Node, DomError> {
    validation::ensure_replace_validity(node, parent, child)?;
    let mut reference = child.next_sibling();
    if reference.as_ref() == Some(node) {
        reference = node.next_sibling();
    }
    remove(child, parent);
    insert(node, parent, reference.as_ref(), false);
    Ok(child.clone())
}

/// [§ 4.2 `pre_remove(child, parent)`](../index.html): validate then
/// [`remove`].
pub fn remove_child(parent: &Node, child: &Node) -> Result<Node, DomError> {
    validation::ensure_pre_removal_validity(child, parent)?;
    remove(child, parent);
    Ok(child.clone())
}

/// [§ 4.2 `remove(node, parent, suppress_observers)`](../index.html)
fn remove(node: &Node, parent: &Node) {
    observer::record_mutation(parent, MutationRecordKind::ChildListRemove { removed: node.clone() });
    if let Some(document) = node.owner_document() {
        crate::node::notify_iterators_removed(&document, node);
    }
    splice_out(node);
}

/// [§ 4.6 `adopt(node, document)`](../index.html)
///
/// "Changes node's owner document (and that of its whole subtree) to
/// document, running the adopting steps on each node so interned atoms
/// move to the new document's string pool." A no-op if `node` is already
/// owned by `document`.
pub fn adopt(node: &Node, document: &Node) {
    if node.owner_document().as_ref() == Some(document) {
        return;
    }
    if let Some(old_parent) = node.parent() {
        splice_out(node);
        let _ = old_parent;
    }
    for descendant in crate::tree::pre_order(node) {
        descendant.set_owner_document(Some(document));
        descendant.run_adopting_steps(document);
        descendant.with_specific_mut(|specific| {
            if let NodeSpecific::Attr(attr) = specific {
                attr.owner_element = None;
            }
        });
    }
}
