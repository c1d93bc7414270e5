//! `AbortController`/`AbortSignal`: cooperative cancellation shared
//! across pending work. [§ 4.9](../index.html).
//!
//! An `AbortSignal` is an `EventTarget` "without tree context" (§4.7) —
//! it never joins a document's node tree, so it gets its own small
//! `Rc`-based handle rather than living inside [`crate::node::Node`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::AbortReason;
use crate::event::{dispatch_at_signal, Event, EventInit, ListenerCallback, ListenerTable};

/// A zero-argument teardown callback registered via
/// [`AbortSignal::add_algorithm`]. Boxed the same way event listener
/// callbacks are (§4.7): this crate has no scripting-engine closure type
/// to bridge to, so a native Rust closure fills that role directly.
pub type AbortAlgorithm = Rc<dyn Fn()>;

struct AbortSignalRepr {
    aborted: Cell<bool>,
    reason: RefCell<Option<AbortReason>>,
    algorithms: RefCell<Vec<AbortAlgorithm>>,
    listeners: RefCell<ListenerTable>,
}

/// A cancellation signal. Cheap to clone (an `Rc` handle); clones refer
/// to the same underlying signal.
#[derive(Clone)]
pub struct AbortSignal(Rc<AbortSignalRepr>);

impl PartialEq for AbortSignal {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for AbortSignal {}

impl AbortSignal {
    fn new() -> Self {
        Self(Rc::new(AbortSignalRepr {
            aborted: Cell::new(false),
            reason: RefCell::new(None),
            algorithms: RefCell::new(Vec::new()),
            listeners: RefCell::new(ListenerTable::default()),
        }))
    }

    /// [§ 4.9 `is_aborted`](../index.html)
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.0.aborted.get()
    }

    /// [§ 4.9 `reason`](../index.html): `None` while not yet aborted.
    #[must_use]
    pub fn reason(&self) -> Option<AbortReason> {
        self.0.reason.borrow().clone()
    }

    /// [§ 4.9 `throw_if_aborted`](../index.html)
    pub fn throw_if_aborted(&self) -> Result<(), crate::error::DomError> {
        if self.is_aborted() {
            Err(crate::error::DomError::AbortError)
        } else {
            Ok(())
        }
    }

    /// [§ 4.9 `add_algorithm`](../index.html): registers `algorithm` to
    /// run once, immediately, if the signal is already aborted, or the
    /// next time it aborts. Algorithms run in registration order, before
    /// the `"abort"` event is dispatched.
    pub fn add_algorithm(&self, algorithm: AbortAlgorithm) {
        if self.is_aborted() {
            algorithm();
            return;
        }
        self.0.algorithms.borrow_mut().push(algorithm);
    }

    pub(crate) fn listener_snapshot(&self, event_type: &str) -> Vec<crate::event::ListenerRecord> {
        self.0.listeners.borrow().listeners_for(event_type).to_vec()
    }

    /// [§ 4.9 `add_event_listener`](../index.html) for a signal.
    pub fn add_event_listener(&self, event_type: &str, callback: ListenerCallback, capture: bool) {
        let _ = self.0.listeners.borrow_mut().add(event_type, callback, capture, false, false);
    }

    /// [§ 4.9 `remove_event_listener`](../index.html) for a signal.
    pub fn remove_event_listener(&self, event_type: &str, callback: &ListenerCallback, capture: bool) {
        self.0.listeners.borrow_mut().remove(event_type, callback, capture);
    }

    /// [§ 4.9 `signal_abort(reason)`](../index.html): a no-op if already
    /// aborted — calling this twice has the same observable effect as
    /// calling it once. Runs every registered algorithm (in order), then
    /// dispatches the `"abort"` event.
    pub fn signal_abort(&self, reason: AbortReason) {
        if self.0.aborted.replace(true) {
            return;
        }
        *self.0.reason.borrow_mut() = Some(reason);
        let algorithms = std::mem::take(&mut *self.0.algorithms.borrow_mut());
        for algorithm in algorithms {
            algorithm();
        }
        let event = Event::new("abort", EventInit { bubbles: false, cancelable: false, composed: false });
        dispatch_at_signal(self, &event);
    }

    /// [§ 4.9 `AbortSignal::any(signals)`](../index.html): a derived
    /// signal that aborts as soon as any one of `signals` does, carrying
    /// that source's reason.
    ///
    /// Rather than tracking an explicit flattened source-signal set,
    /// this registers one teardown algorithm per source signal directly.
    /// The derived signal still aborts exactly once, with the first
    /// source's reason — it simply costs O(depth) algorithm hops instead
    /// of O(1) for a signal formed from another `any()` signal, which is
    /// never a hot path here.
    #[must_use]
    pub fn any(signals: &[AbortSignal]) -> AbortSignal {
        let derived = AbortSignal::new();
        for source in signals {
            if source.is_aborted() {
                derived.signal_abort(source.reason().unwrap_or(AbortReason::Default));
                return derived;
            }
        }
        for source in signals {
            let derived_clone = derived.clone();
            let source_clone = source.clone();
            source.add_algorithm(Rc::new(move || {
                if !derived_clone.is_aborted() {
                    derived_clone.signal_abort(source_clone.reason().unwrap_or(AbortReason::Default));
                }
            }));
        }
        derived
    }
}

/// [§ 4.9 `AbortController`](../index.html): owns exactly one
/// `AbortSignal` and is the only thing that can abort it.
pub struct AbortController {
    signal: AbortSignal,
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortController {
    /// Creates a controller with a fresh, not-yet-aborted signal.
    #[must_use]
    pub fn new() -> Self {
        Self { signal: AbortSignal::new() }
    }

    /// The controller's signal.
    #[must_use]
    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    /// [§ 4.9 `abort(reason)`](../index.html)
    pub fn abort(&self, reason: Option<AbortReason>) {
        self.signal.signal_abort(reason.unwrap_or(AbortReason::Default));
    }
}

/// Per-signal state kept in a node's rare-data block.
///
/// Unused by the standalone [`AbortSignal`] above (which carries its own
/// state directly, since it is never a `Node`); reserved for a future
/// node kind that is itself abortable in place, and kept here because
/// [`crate::rare_data::RareData`] already declares a field of this type.
#[derive(Default)]
pub struct AbortState {
    /// The signal attached to the owning node, if any.
    pub signal: Option<AbortSignal>,
}
