//! Mutation observer hook: record production without a microtask queue.
//!
//! [§ 4.13](../index.html): `MutationRecord`s are produced synchronously
//! at the point of mutation and handed to a caller-supplied sink;
//! queuing, microtask-timing, and batching by `takeRecords` are
//! scripting-engine concerns this crate deliberately does not own.

use crate::node::Node;

/// What changed, carried inside a [`MutationRecord`].
#[derive(Clone)]
pub enum MutationRecordKind {
    /// A node was appended/inserted as a child.
    ChildListAdd {
        /// The node that was added.
        added: Node,
    },
    /// A node was removed as a child.
    ChildListRemove {
        /// The node that was removed.
        removed: Node,
    },
    /// A node already connected elsewhere was relocated to a new position
    /// without ever being detached (`move_before`).
    ChildListMove {
        /// The node that moved.
        moved: Node,
    },
    /// An attribute was added, changed, or removed.
    Attributes {
        /// The local name of the changed attribute.
        local_name: String,
        /// The attribute's previous value, if the observer requested
        /// `attribute_old_value`.
        old_value: Option<String>,
    },
    /// A character-data node's data changed.
    CharacterData {
        /// The previous data, if the observer requested
        /// `character_data_old_value`.
        old_value: Option<String>,
    },
}

/// A single observed mutation, as produced by this crate's mutation
/// engine and handed to every registered, in-scope
/// [`MutationObserver`]'s sink.
#[derive(Clone)]
pub struct MutationRecord {
    /// The node the mutation happened on (the `target` of the record).
    pub target: Node,
    /// What kind of change this was.
    pub kind: MutationRecordKind,
}

/// Which kinds of mutation an observer wants to hear about, and with how
/// much detail. Mirrors `MutationObserverInit` minus the scripting-only
/// fields (`attributeFilter` is supported; the rest is caller's choice of
/// sink granularity).
#[derive(Clone, Default)]
pub struct ObserverInit {
    /// Observe child list changes (`childList: true`).
    pub child_list: bool,
    /// Observe attribute changes.
    pub attributes: bool,
    /// Observe character-data changes.
    pub character_data: bool,
    /// Also observe `target`'s entire subtree, not just its direct
    /// children/own attributes.
    pub subtree: bool,
    /// Include the previous attribute value in each record.
    pub attribute_old_value: bool,
    /// Include the previous character data in each record.
    pub character_data_old_value: bool,
    /// If non-empty, only report attribute changes for these local
    /// names.
    pub attribute_filter: Vec<String>,
}

/// One observer's registration on one target node.
#[derive(Clone)]
pub struct ObserverRegistration {
    /// The options this observer was registered with on this target.
    pub options: ObserverInit,
    /// The sink mutation records are pushed into. A `Vec` rather than a
    /// callback: this crate has no task queue to schedule a callback
    /// onto (§4.13), so records simply accumulate for the caller to
    /// drain, mirroring `takeRecords()`.
    pub sink: std::rc::Rc<std::cell::RefCell<Vec<MutationRecord>>>,
}

/// Registers `sink` to receive records matching `options` for mutations
/// at or (if `options.subtree`) under `target`.
pub fn observe(target: &Node, options: ObserverInit, sink: std::rc::Rc<std::cell::RefCell<Vec<MutationRecord>>>) {
    target.observer_registrations_mut().push(ObserverRegistration { options, sink });
    target.compact_rare();
}

/// Removes every registration on `target` that shares `sink`'s identity.
pub fn disconnect(target: &Node, sink: &std::rc::Rc<std::cell::RefCell<Vec<MutationRecord>>>) {
    target
        .observer_registrations_mut()
        .retain(|reg| !std::rc::Rc::ptr_eq(&reg.sink, sink));
    target.compact_rare();
}

/// Called by [`crate::mutation`] at the point of every child-list change.
/// Walks `target` and its ancestors (for `subtree`-registered observers)
/// and appends a record to each matching sink.
pub(crate) fn record_mutation(target: &Node, kind: MutationRecordKind) {
    let matches_kind = |options: &ObserverInit| match &kind {
        MutationRecordKind::ChildListAdd { .. }
        | MutationRecordKind::ChildListRemove { .. }
        | MutationRecordKind::ChildListMove { .. } => options.child_list,
        MutationRecordKind::Attributes { local_name, .. } => {
            options.attributes
                && (options.attribute_filter.is_empty()
                    || options.attribute_filter.iter().any(|f| f == local_name))
        }
        MutationRecordKind::CharacterData { .. } => options.character_data,
    };

    let mut cursor = Some(target.clone());
    let mut depth = 0;
    while let Some(node) = cursor {
        if let Some(rare) = node.rare().as_ref() {
            for registration in &rare.observers {
                if depth > 0 && !registration.options.subtree {
                    continue;
                }
                if matches_kind(&registration.options) {
                    registration.sink.borrow_mut().push(MutationRecord {
                        target: target.clone(),
                        kind: kind.clone(),
                    });
                }
            }
        }
        cursor = node.parent();
        depth += 1;
    }
}
