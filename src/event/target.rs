//! Listener storage shared by every `EventTarget` (nodes, and the
//! standalone `AbortSignal`). [§ 4.7](../index.html).

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use super::Event;

/// A registered listener's callback. Boxed behind `Rc` rather than a
/// scripting-engine closure handle: this crate has no JS value type, so
/// a Rust closure is the idiomatic stand-in, and `Rc` identity
/// (`Rc::ptr_eq`) is what `remove_event_listener` and the
/// "already registered" de-duplication check in `add_event_listener`
/// both key off of.
pub type ListenerCallback = Rc<dyn Fn(&Event)>;

/// One `add_event_listener` registration.
#[derive(Clone)]
pub struct ListenerRecord {
    pub(crate) callback: ListenerCallback,
    pub(crate) capture: bool,
    pub(crate) passive: bool,
    pub(crate) once: bool,
    /// Set to `true` by `remove_event_listener` or by a linked
    /// `AbortSignal` firing. Checked (and lazily compacted) before each
    /// invocation rather than requiring an immediate `Vec` shuffle —
    /// [§ 4.9](../index.html) "removal during dispatch must not disturb
    /// the in-progress listener list".
    pub(crate) removed: Rc<Cell<bool>>,
}

impl ListenerRecord {
    fn matches(&self, callback: &ListenerCallback, capture: bool) -> bool {
        Rc::ptr_eq(&self.callback, callback) && self.capture == capture
    }
}

/// Every listener registered on one `EventTarget`, keyed by event type.
/// Order within a type is insertion order, matching dispatch order
/// (§4.9: "callbacks for a given type fire in the order they were
/// added").
#[derive(Default)]
pub struct ListenerTable {
    by_type: HashMap<String, Vec<ListenerRecord>>,
}

impl ListenerTable {
    /// Whether any (non-removed) listener is registered for any type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.values().all(|v| v.iter().all(|r| r.removed.get()))
    }

    /// [§ 4.9 `add_event_listener`](../index.html): a duplicate
    /// `(type, callback, capture)` registration is a no-op.
    pub fn add(
        &mut self,
        event_type: &str,
        callback: ListenerCallback,
        capture: bool,
        passive: bool,
        once: bool,
    ) -> Rc<Cell<bool>> {
        let list = self.by_type.entry(event_type.to_string()).or_default();
        if let Some(existing) = list.iter().find(|r| r.matches(&callback, capture)) {
            return Rc::clone(&existing.removed);
        }
        let removed = Rc::new(Cell::new(false));
        list.push(ListenerRecord { callback, capture, passive, once, removed: Rc::clone(&removed) });
        removed
    }

    /// [§ 4.9 `remove_event_listener`](../index.html): marks the matching
    /// record removed (logical delete; see [`ListenerRecord::removed`]).
    pub fn remove(&mut self, event_type: &str, callback: &ListenerCallback, capture: bool) {
        if let Some(list) = self.by_type.get_mut(event_type) {
            if let Some(record) = list.iter().find(|r| r.matches(callback, capture)) {
                record.removed.set(true);
            }
        }
    }

    /// Listeners for `event_type`, in registration order, including ones
    /// marked removed (callers filter those out at invocation time so a
    /// removal mid-dispatch doesn't shift indices out from under an
    /// in-progress walk).
    #[must_use]
    pub fn listeners_for(&self, event_type: &str) -> &[ListenerRecord] {
        self.by_type.get(event_type).map_or(&[], Vec::as_slice)
    }

    /// Drops fully-removed entries and empty type buckets. Called
    /// opportunistically after dispatch completes.
    pub fn compact(&mut self) {
        for list in self.by_type.values_mut() {
            list.retain(|r| !r.removed.get());
        }
        self.by_type.retain(|_, list| !list.is_empty());
    }
}
