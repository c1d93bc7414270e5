//! The lazily allocated side table attached to a node for optional state.
//!
//! [§ 3.3 Rare-data block](../index.html)
//!
//! "A lazily allocated side structure attached to any node that needs
//! optional state, keeping the base size flat." Most nodes in a typical
//! document never register a listener, never participate in an abort
//! graph, and are never observed — so `RareData` lives behind
//! `RefCell<Option<Box<RareData>>>` on [`crate::node::Node`] and is
//! allocated only the first time one of its fields is touched.

use crate::event::ListenerTable;
use crate::node::WeakNode;
use crate::observer::ObserverRegistration;

/// Optional per-node state. See module docs.
#[derive(Default)]
pub struct RareData {
    /// Registered event listeners, keyed by event type, insertion order
    /// preserved within a type. Only present on `EventTarget`s that have
    /// called `add_event_listener` at least once.
    pub listeners: ListenerTable,
    /// `AbortSignal`-specific state (dependent/source signal lists, the
    /// algorithm list). `None` on nodes that aren't signals.
    pub abort: Option<crate::abort::AbortState>,
    /// Mutation observer registrations targeting this node (§4.13).
    pub observers: Vec<ObserverRegistration>,
    /// The slot this node is currently assigned to, if any (shadow DOM
    /// slotting; tracked for completeness but not otherwise interpreted
    /// by this crate, which does not implement shadow-tree rendering).
    pub assigned_slot: Option<WeakNode>,
}

impl RareData {
    /// True if every optional field is at its default (empty) state,
    /// i.e. this block could be dropped without losing anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
            && self.abort.is_none()
            && self.observers.is_empty()
            && self.assigned_slot.is_none()
    }
}
