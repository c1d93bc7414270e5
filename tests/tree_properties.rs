//! Property-based checks for tree invariants and the `An+B` nth-formula,
//! run against arbitrary small inputs rather than hand-picked examples.

use koala_dom::node::{create_element, new_document};
use koala_dom::{mutation, tree, AbortController};
use quickcheck_macros::quickcheck;

/// For every node with a parent, the node appears exactly once in that
/// parent's child list, and the sibling links agree with child order.
#[quickcheck]
fn every_child_appears_once_with_consistent_siblings(fan_out: u8) -> bool {
    let fan_out = (fan_out % 12) as usize;
    let document = new_document("about:blank", "text/html");
    let parent = create_element(&document, "parent").unwrap();
    let children: Vec<_> = (0..fan_out)
        .map(|_| {
            let child = create_element(&document, "child").unwrap();
            mutation::append(&parent, &child).unwrap();
            child
        })
        .collect();

    let listed: Vec<_> = parent.children().collect();
    if listed.len() != children.len() {
        return false;
    }
    for child in &children {
        if listed.iter().filter(|n| *n == child).count() != 1 {
            return false;
        }
    }
    for window in listed.windows(2) {
        let [a, b] = window else { unreachable!() };
        if a.next_sibling().as_ref() != Some(b) {
            return false;
        }
        if b.previous_sibling().as_ref() != Some(a) {
            return false;
        }
    }
    listed.iter().all(|n| n.parent().as_ref() == Some(&parent))
}

/// Removing any single child leaves every remaining child's sibling
/// chain intact and the removed node parentless.
#[quickcheck]
fn removing_one_child_preserves_the_rest_of_the_chain(fan_out: u8, victim: u8) -> bool {
    let fan_out = (fan_out % 10 + 1) as usize;
    let victim = (victim as usize) % fan_out;

    let document = new_document("about:blank", "text/html");
    let parent = create_element(&document, "parent").unwrap();
    let children: Vec<_> = (0..fan_out)
        .map(|_| {
            let child = create_element(&document, "child").unwrap();
            mutation::append(&parent, &child).unwrap();
            child
        })
        .collect();

    mutation::remove_child(&parent, &children[victim]).unwrap();

    if children[victim].parent().is_some() || tree::contains(&parent, &children[victim]) {
        return false;
    }

    let remaining: Vec<_> = parent.children().collect();
    let expected: Vec<_> = children.iter().enumerate().filter(|(i, _)| *i != victim).map(|(_, n)| n.clone()).collect();
    remaining == expected
}

/// An element's 1-based position matches `:nth-child(An+B)` iff there is
/// some non-negative integer `n` with `index == a*n + b`. Checked by
/// brute-force search over a bounded range of `n` rather than reusing
/// `AnB::matches`'s own arithmetic, so the test is an independent check
/// of the formula rather than a restatement of it.
#[quickcheck]
fn nth_formula_matches_iff_arithmetic_progression_member(a: i8, b: i8, index: u8) -> bool {
    use koala_dom::selector::nth::AnB;

    let a = i32::from(a);
    let b = i32::from(b);
    let index = i32::from(index % 64) + 1;
    let formula = AnB { a, b };

    let arithmetic_member = (0..=1000).any(|n| a * n + b == index);

    formula.matches(index) == arithmetic_member
}

/// Calling `abort()` on a controller a second time has no additional
/// observable effect: the registered algorithms run exactly once no
/// matter how many times abort is requested.
#[quickcheck]
fn repeated_abort_calls_run_algorithms_exactly_once(extra_calls: u8) -> bool {
    use std::cell::Cell;
    use std::rc::Rc;

    let controller = AbortController::new();
    let runs = Rc::new(Cell::new(0u32));
    let flag = Rc::clone(&runs);
    controller.signal().add_algorithm(Rc::new(move || flag.set(flag.get() + 1)));

    for _ in 0..=(extra_calls % 5) {
        controller.abort(None);
    }

    runs.get() == 1
}
