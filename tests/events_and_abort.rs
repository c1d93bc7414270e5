//! End-to-end scenarios for event dispatch, `AbortController`/
//! `AbortSignal`, and `MutationObserver` record production.

use std::cell::RefCell;
use std::rc::Rc;

use koala_dom::error::AbortReason;
use koala_dom::event::{Event, EventInit};
use koala_dom::node::{create_element, new_document};
use koala_dom::observer::{self, MutationRecordKind, ObserverInit};
use koala_dom::{mutation, AbortController, AbortSignal};

#[test]
fn non_bubbling_event_only_invokes_capture_and_target_listeners() {
    let document = new_document("about:blank", "text/html");
    let parent = create_element(&document, "parent").unwrap();
    let child = create_element(&document, "child").unwrap();
    mutation::append(&parent, &child).unwrap();

    let capture_seen = Rc::new(RefCell::new(false));
    let bubble_seen = Rc::new(RefCell::new(false));
    let target_seen = Rc::new(RefCell::new(false));

    {
        let flag = Rc::clone(&capture_seen);
        parent.add_event_listener("ping", Rc::new(move |_| *flag.borrow_mut() = true), true);
    }
    {
        let flag = Rc::clone(&bubble_seen);
        parent.add_event_listener("ping", Rc::new(move |_| *flag.borrow_mut() = true), false);
    }
    {
        let flag = Rc::clone(&target_seen);
        child.add_event_listener("ping", Rc::new(move |_| *flag.borrow_mut() = true), false);
    }

    let event = Event::new("ping", EventInit { bubbles: false, cancelable: false, composed: false });
    child.dispatch_event(&event).unwrap();

    assert!(*capture_seen.borrow());
    assert!(*target_seen.borrow());
    assert!(!*bubble_seen.borrow());
}

#[test]
fn bubbling_event_reaches_ancestor_bubble_listeners() {
    let document = new_document("about:blank", "text/html");
    let parent = create_element(&document, "parent").unwrap();
    let child = create_element(&document, "child").unwrap();
    mutation::append(&parent, &child).unwrap();

    let bubble_seen = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&bubble_seen);
    parent.add_event_listener("ping", Rc::new(move |_| *flag.borrow_mut() = true), false);

    let event = Event::new("ping", EventInit { bubbles: true, cancelable: false, composed: false });
    child.dispatch_event(&event).unwrap();

    assert!(*bubble_seen.borrow());
}

#[test]
fn removing_a_listener_during_dispatch_does_not_affect_the_in_flight_snapshot() {
    let document = new_document("about:blank", "text/html");
    let target = create_element(&document, "target").unwrap();

    let second_ran = Rc::new(RefCell::new(false));
    let second_flag = Rc::clone(&second_ran);
    let second_callback: koala_dom::event::ListenerCallback = Rc::new(move |_| *second_flag.borrow_mut() = true);

    {
        let target_for_removal = target.clone();
        let callback_to_remove = Rc::clone(&second_callback);
        target.add_event_listener(
            "ping",
            Rc::new(move |_| {
                target_for_removal.remove_event_listener("ping", &callback_to_remove, false);
            }),
            false,
        );
    }
    target.add_event_listener("ping", Rc::clone(&second_callback), false);

    let event = Event::new("ping", EventInit::default());
    target.dispatch_event(&event).unwrap();

    assert!(*second_ran.borrow(), "listener present in the snapshot at phase entry still runs");
}

#[test]
fn once_listener_is_removed_before_its_own_callback_runs() {
    let document = new_document("about:blank", "text/html");
    let target = create_element(&document, "target").unwrap();

    let calls = Rc::new(RefCell::new(0));
    let reentrant_calls = Rc::new(RefCell::new(0));
    let flag = Rc::clone(&calls);
    let reentrant_flag = Rc::clone(&reentrant_calls);
    let target_for_reentry = target.clone();
    target.add_event_listener_ext(
        "ping",
        Rc::new(move |_| {
            *flag.borrow_mut() += 1;
            // Re-enter dispatch for the same type on the same target from
            // inside the `once` listener's own callback: if the listener
            // were still registered at this point, this nested dispatch
            // would invoke it again.
            let nested = Event::new("ping", EventInit::default());
            target_for_reentry.dispatch_event(&nested).unwrap();
            *reentrant_flag.borrow_mut() = *flag.borrow();
        }),
        false,
        false,
        true,
        None,
    );

    target.dispatch_event(&Event::new("ping", EventInit::default())).unwrap();
    assert_eq!(*calls.borrow(), 1, "once listener fires exactly once even when it re-enters dispatch");
    assert_eq!(
        *reentrant_calls.borrow(),
        1,
        "the listener was already removed by the time its own callback ran, so the nested dispatch did not see it"
    );

    target.dispatch_event(&Event::new("ping", EventInit::default())).unwrap();
    assert_eq!(*calls.borrow(), 1, "a once listener does not run again on a later dispatch either");
}

#[test]
fn abort_signal_any_flattens_a_diamond_and_fires_once() {
    let c1 = AbortController::new();
    let c2 = AbortController::new();
    let signal = AbortSignal::any(&[c1.signal(), c2.signal()]);

    let fired = Rc::new(RefCell::new(0));
    let flag = Rc::clone(&fired);
    signal.add_event_listener("abort", Rc::new(move |_| *flag.borrow_mut() += 1), false);

    c1.abort(Some(AbortReason::Custom("boom".to_string())));
    assert!(signal.is_aborted());
    assert_eq!(signal.reason().map(|r| r.to_string()), Some("boom".to_string()));
    assert_eq!(*fired.borrow(), 1);

    c2.abort(None);
    assert_eq!(*fired.borrow(), 1, "a signal fires its abort event exactly once");
}

#[test]
fn abort_signal_teardown_stops_further_listener_invocation() {
    let document = new_document("about:blank", "text/html");
    let element = create_element(&document, "element").unwrap();
    let controller = AbortController::new();

    let calls = Rc::new(RefCell::new(0));
    let flag = Rc::clone(&calls);
    element.add_event_listener_ext(
        "test",
        Rc::new(move |_| *flag.borrow_mut() += 1),
        false,
        false,
        false,
        Some(&controller.signal()),
    );

    element.dispatch_event(&Event::new("test", EventInit::default())).unwrap();
    element.dispatch_event(&Event::new("test", EventInit::default())).unwrap();
    assert_eq!(*calls.borrow(), 2);

    controller.abort(None);
    element.dispatch_event(&Event::new("test", EventInit::default())).unwrap();
    assert_eq!(*calls.borrow(), 2, "listener torn down by abort must not run again");
}

#[test]
fn abort_is_idempotent() {
    let controller = AbortController::new();
    let runs = Rc::new(RefCell::new(0));
    let flag = Rc::clone(&runs);
    controller.signal().add_algorithm(Rc::new(move || *flag.borrow_mut() += 1));

    controller.abort(None);
    controller.abort(None);
    assert_eq!(*runs.borrow(), 1);
}

#[test]
fn mutation_observer_sees_child_list_additions_in_subtree_mode() {
    let document = new_document("about:blank", "text/html");
    let root = create_element(&document, "root").unwrap();
    let child = create_element(&document, "child").unwrap();
    mutation::append(&root, &child).unwrap();

    let sink = Rc::new(RefCell::new(Vec::new()));
    observer::observe(
        &root,
        ObserverInit { child_list: true, subtree: true, ..ObserverInit::default() },
        Rc::clone(&sink),
    );

    let grandchild = create_element(&document, "grandchild").unwrap();
    mutation::append(&child, &grandchild).unwrap();

    let records = sink.borrow();
    assert_eq!(records.len(), 1);
    match &records[0].kind {
        MutationRecordKind::ChildListAdd { added } => assert_eq!(added, &grandchild),
        _ => panic!("expected a ChildListAdd record"),
    }
}

#[test]
fn mutation_observer_sees_attribute_changes_with_old_value() {
    let document = new_document("about:blank", "text/html");
    let element = create_element(&document, "div").unwrap();
    koala_dom::node::set_attribute(&element, "data-x", "1");

    let sink = Rc::new(RefCell::new(Vec::new()));
    observer::observe(
        &element,
        ObserverInit { attributes: true, ..ObserverInit::default() },
        Rc::clone(&sink),
    );

    koala_dom::node::set_attribute(&element, "data-x", "2");
    koala_dom::node::remove_attribute(&element, "data-x");
    let _ = koala_dom::node::toggle_attribute(&element, "hidden", None);

    let records = sink.borrow();
    assert_eq!(records.len(), 3);
    match &records[0].kind {
        MutationRecordKind::Attributes { local_name, old_value } => {
            assert_eq!(local_name, "data-x");
            assert_eq!(old_value.as_deref(), Some("1"));
        }
        _ => panic!("expected an Attributes record"),
    }
    match &records[1].kind {
        MutationRecordKind::Attributes { local_name, old_value } => {
            assert_eq!(local_name, "data-x");
            assert_eq!(old_value.as_deref(), Some("2"));
        }
        _ => panic!("expected an Attributes record"),
    }
    match &records[2].kind {
        MutationRecordKind::Attributes { local_name, old_value } => {
            assert_eq!(local_name, "hidden");
            assert_eq!(old_value, &None);
        }
        _ => panic!("expected an Attributes record"),
    }
}

#[test]
fn mutation_observer_ignores_attribute_changes_outside_the_filter() {
    let document = new_document("about:blank", "text/html");
    let element = create_element(&document, "div").unwrap();

    let sink = Rc::new(RefCell::new(Vec::new()));
    observer::observe(
        &element,
        ObserverInit {
            attributes: true,
            attribute_filter: vec!["class".to_string()],
            ..ObserverInit::default()
        },
        Rc::clone(&sink),
    );

    koala_dom::node::set_attribute(&element, "id", "ignored");
    koala_dom::node::set_attribute(&element, "class", "seen");

    let records = sink.borrow();
    assert_eq!(records.len(), 1);
    match &records[0].kind {
        MutationRecordKind::Attributes { local_name, .. } => assert_eq!(local_name, "class"),
        _ => panic!("expected an Attributes record"),
    }
}

#[test]
fn move_before_relocates_a_node_and_emits_a_single_move_record() {
    let document = new_document("about:blank", "text/html");
    let first_list = create_element(&document, "first").unwrap();
    let second_list = create_element(&document, "second").unwrap();
    let item = create_element(&document, "item").unwrap();
    let anchor = create_element(&document, "anchor").unwrap();
    mutation::append(&first_list, &item).unwrap();
    mutation::append(&second_list, &anchor).unwrap();

    let first_sink = Rc::new(RefCell::new(Vec::new()));
    let second_sink = Rc::new(RefCell::new(Vec::new()));
    observer::observe(
        &first_list,
        ObserverInit { child_list: true, ..ObserverInit::default() },
        Rc::clone(&first_sink),
    );
    observer::observe(
        &second_list,
        ObserverInit { child_list: true, ..ObserverInit::default() },
        Rc::clone(&second_sink),
    );

    koala_dom::mixins::move_before(&second_list, &item, Some(&anchor)).unwrap();

    assert_eq!(item.parent(), Some(second_list.clone()));
    assert_eq!(item.next_sibling(), Some(anchor));
    assert!(first_sink.borrow().is_empty(), "the node's old parent sees no record at all, not a remove");

    let records = second_sink.borrow();
    assert_eq!(records.len(), 1, "a move is a single record, not a remove-then-add pair");
    match &records[0].kind {
        MutationRecordKind::ChildListMove { moved } => assert_eq!(moved, &item),
        _ => panic!("expected a ChildListMove record"),
    }
}

#[test]
fn mutation_observer_sees_character_data_changes() {
    let document = new_document("about:blank", "text/html");
    let text = koala_dom::node::create_text_node(&document, "Hello");

    let sink = Rc::new(RefCell::new(Vec::new()));
    observer::observe(
        &text,
        ObserverInit { character_data: true, ..ObserverInit::default() },
        Rc::clone(&sink),
    );

    koala_dom::node::append_data(&text, ", World");
    assert_eq!(koala_dom::node::data(&text), "Hello, World");

    text.set_node_value(Some("Replaced"));

    let records = sink.borrow();
    assert_eq!(records.len(), 2);
    match &records[0].kind {
        MutationRecordKind::CharacterData { old_value } => {
            assert_eq!(old_value.as_deref(), Some("Hello"));
        }
        _ => panic!("expected a CharacterData record"),
    }
    match &records[1].kind {
        MutationRecordKind::CharacterData { old_value } => {
            assert_eq!(old_value.as_deref(), Some("Hello, World"));
        }
        _ => panic!("expected a CharacterData record"),
    }
}
