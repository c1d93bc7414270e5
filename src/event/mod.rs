//! `Event` objects and the capture/target/bubble dispatch algorithm.
//!
//! [§ 4.7-4.9](../index.html): EventTarget's `add_event_listener`/
//! `remove_event_listener`/`dispatch_event`, the `Event` object's fields,
//! and the full three-phase dispatch walk, including the shadow-boundary
//! crossing rule for `composed` events.

mod target;

pub use target::{ListenerCallback, ListenerRecord, ListenerTable};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::abort::AbortSignal;
use crate::error::DomError;
use crate::node::{Node, NodeKind, NodeSpecific};

/// Which phase of dispatch is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    /// No dispatch in progress.
    #[default]
    None,
    /// Walking from the root down to (not including) the target.
    Capturing,
    /// Invoking listeners registered directly on the target.
    AtTarget,
    /// Walking from the target back up to the root.
    Bubbling,
}

/// Either kind of `EventTarget` this crate has: a tree [`Node`], or a
/// standalone [`AbortSignal`] (§4.7: "documents and abort signals are
/// also event targets, without tree context").
#[derive(Clone)]
pub enum EventTarget {
    /// A node in some document's tree.
    Node(Node),
    /// An `AbortSignal`, dispatching only its own "abort" event.
    Signal(AbortSignal),
}

impl PartialEq for EventTarget {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Node(a), Self::Node(b)) => a == b,
            (Self::Signal(a), Self::Signal(b)) => a == b,
            _ => false,
        }
    }
}

/// Construction-time options for [`Event::new`], mirroring `EventInit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventInit {
    /// Whether the event bubbles past its target.
    pub bubbles: bool,
    /// Whether `prevent_default` has any effect.
    pub cancelable: bool,
    /// Whether the event can cross a shadow root boundary.
    pub composed: bool,
}

/// [§ 4.8 Event object](../index.html)
pub struct Event {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    composed: bool,
    target: RefCell<Option<EventTarget>>,
    current_target: RefCell<Option<EventTarget>>,
    path: RefCell<Vec<EventTarget>>,
    phase: Cell<EventPhase>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
    dispatching: Cell<bool>,
}

impl Event {
    /// Constructs a new, not-yet-dispatched event.
    #[must_use]
    pub fn new(event_type: impl Into<String>, init: EventInit) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            composed: init.composed,
            target: RefCell::new(None),
            current_target: RefCell::new(None),
            path: RefCell::new(Vec::new()),
            phase: Cell::new(EventPhase::None),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
            dispatching: Cell::new(false),
        }
    }

    /// The event's type string, e.g. `"abort"`.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Whether this event bubbles.
    #[must_use]
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether `prevent_default` can have an effect on this event.
    #[must_use]
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Whether this event can cross a shadow root boundary.
    #[must_use]
    pub fn composed(&self) -> bool {
        self.composed
    }

    /// The object `dispatch_event` was called on.
    #[must_use]
    pub fn target(&self) -> Option<EventTarget> {
        self.target.borrow().clone()
    }

    /// The object currently being visited during dispatch, or `None`
    /// once dispatch has completed.
    #[must_use]
    pub fn current_target(&self) -> Option<EventTarget> {
        self.current_target.borrow().clone()
    }

    /// The current dispatch phase.
    #[must_use]
    pub fn event_phase(&self) -> EventPhase {
        self.phase.get()
    }

    /// [§ 4.8 `composed_path`](../index.html): the objects currently part
    /// of the event's path, target first. Empty once dispatch has
    /// completed.
    #[must_use]
    pub fn composed_path(&self) -> Vec<EventTarget> {
        self.path.borrow().clone()
    }

    /// [§ 4.8 `prevent_default`](../index.html): a no-op unless
    /// `cancelable` is set.
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    /// Whether `prevent_default` has taken effect.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Stops the event from propagating past the current target (the
    /// remaining listeners on the current target still run).
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// As [`Self::stop_propagation`], and additionally skips any
    /// remaining listeners on the current target.
    pub fn stop_immediate_propagation(&self) {
        self.propagation_stopped.set(true);
        self.immediate_propagation_stopped.set(true);
    }

    fn begin_dispatch(&self) -> Result<(), DomError> {
        if self.dispatching.replace(true) {
            return Err(DomError::InvalidStateError);
        }
        self.default_prevented.set(false);
        self.propagation_stopped.set(false);
        self.immediate_propagation_stopped.set(false);
        Ok(())
    }

    fn end_dispatch(&self) {
        self.dispatching.set(false);
        self.phase.set(EventPhase::None);
        *self.current_target.borrow_mut() = None;
        self.path.borrow_mut().clear();
    }
}

fn invoke_snapshot(snapshot: Vec<ListenerRecord>, event: &Event, capture_filter: Option<bool>) {
    for record in snapshot {
        if record.removed.get() {
            continue;
        }
        if let Some(want_capture) = capture_filter {
            if record.capture != want_capture {
                continue;
            }
        }
        // §7: "An `once` listener that is about to run is removed before
        // the callback is invoked" — so a callback that re-enters dispatch,
        // or never returns normally, still cannot run twice.
        if record.once {
            record.removed.set(true);
        }
        (record.callback)(event);
        if event.immediate_propagation_stopped.get() {
            break;
        }
    }
}

fn node_listener_snapshot(node: &Node, event_type: &str) -> Vec<ListenerRecord> {
    node.rare()
        .as_ref()
        .map(|rare| rare.listeners.listeners_for(event_type).to_vec())
        .unwrap_or_default()
}

/// The next step outward from `node` when building an event path: the
/// tree parent, or — only when `composed` is set — the host of a shadow
/// root (§4.9 shadow-boundary crossing).
fn ancestor_step(node: &Node, composed: bool) -> Option<Node> {
    if let Some(parent) = node.parent() {
        return Some(parent);
    }
    if composed && node.kind() == NodeKind::ShadowRoot {
        return node.with_specific(|specific| match specific {
            NodeSpecific::ShadowRoot(shadow) => shadow.host.upgrade(),
            _ => None,
        });
    }
    None
}

/// Ancestors of `target`, nearest first, honoring `composed`.
fn build_ancestor_chain(target: &Node, composed: bool) -> Vec<Node> {
    let mut chain = Vec::new();
    let mut cursor = target.clone();
    while let Some(next) = ancestor_step(&cursor, composed) {
        chain.push(next.clone());
        cursor = next;
    }
    chain
}

impl Node {
    /// [§ 4.9 `add_event_listener`](../index.html)
    pub fn add_event_listener(
        &self,
        event_type: &str,
        callback: ListenerCallback,
        capture: bool,
    ) {
        self.add_event_listener_ext(event_type, callback, capture, false, false, None);
    }

    /// Full form of `add_event_listener` covering `passive`, `once`, and
    /// an `AbortSignal` that tears the listener down when it fires.
    pub fn add_event_listener_ext(
        &self,
        event_type: &str,
        callback: ListenerCallback,
        capture: bool,
        passive: bool,
        once: bool,
        signal: Option<&AbortSignal>,
    ) {
        if signal.is_some_and(AbortSignal::is_aborted) {
            return;
        }
        let removed = self.listener_table().add(event_type, callback, capture, passive, once);
        if let Some(signal) = signal {
            let target = self.downgrade();
            let event_type = event_type.to_string();
            signal.add_algorithm(Rc::new(move || {
                if let Some(node) = target.upgrade() {
                    removed.set(true);
                    node.compact_rare();
                }
                let _ = &event_type;
            }));
        }
    }

    /// [§ 4.9 `remove_event_listener`](../index.html)
    pub fn remove_event_listener(&self, event_type: &str, callback: &ListenerCallback, capture: bool) {
        self.listener_table().remove(event_type, callback, capture);
        self.compact_rare();
    }

    /// [§ 4.9 `dispatch_event`](../index.html): the full capture/
    /// target/bubble walk. Returns `Ok(false)` if `prevent_default` was
    /// called during dispatch, `Ok(true)` otherwise. `Err(InvalidStateError)`
    /// if `event` is already mid-dispatch (re-entrant dispatch of the
    /// same `Event` object, §4.9 edge case).
    pub fn dispatch_event(&self, event: &Event) -> Result<bool, DomError> {
        event.begin_dispatch()?;

        *event.target.borrow_mut() = Some(EventTarget::Node(self.clone()));
        let ancestors = build_ancestor_chain(self, event.composed);
        let mut full_path = vec![EventTarget::Node(self.clone())];
        full_path.extend(ancestors.iter().cloned().map(EventTarget::Node));
        *event.path.borrow_mut() = full_path;

        event.phase.set(EventPhase::Capturing);
        for ancestor in ancestors.iter().rev() {
            if event.propagation_stopped.get() {
                break;
            }
            *event.current_target.borrow_mut() = Some(EventTarget::Node(ancestor.clone()));
            let snapshot = node_listener_snapshot(ancestor, &event.event_type);
            invoke_snapshot(snapshot, event, Some(true));
        }

        if !event.propagation_stopped.get() {
            event.phase.set(EventPhase::AtTarget);
            *event.current_target.borrow_mut() = Some(EventTarget::Node(self.clone()));
            let snapshot = node_listener_snapshot(self, &event.event_type);
            invoke_snapshot(snapshot, event, None);
        }

        if event.bubbles {
            event.phase.set(EventPhase::Bubbling);
            for ancestor in &ancestors {
                if event.propagation_stopped.get() {
                    break;
                }
                *event.current_target.borrow_mut() = Some(EventTarget::Node(ancestor.clone()));
                let snapshot = node_listener_snapshot(ancestor, &event.event_type);
                invoke_snapshot(snapshot, event, Some(false));
            }
        }

        event.end_dispatch();
        Ok(!event.default_prevented())
    }
}

/// Fires `event` at `signal` with no tree path: a single, target-only
/// phase over `signal`'s own listeners. Used internally by
/// [`crate::abort`] to deliver the `"abort"` event.
pub(crate) fn dispatch_at_signal(signal: &AbortSignal, event: &Event) {
    if event.begin_dispatch().is_err() {
        return;
    }
    let target = EventTarget::Signal(signal.clone());
    *event.target.borrow_mut() = Some(target.clone());
    *event.path.borrow_mut() = vec![target.clone()];
    event.phase.set(EventPhase::AtTarget);
    *event.current_target.borrow_mut() = Some(target);
    let snapshot = signal.listener_snapshot(&event.event_type);
    invoke_snapshot(snapshot, event, None);
    event.end_dispatch();
}
