//! End-to-end scenarios for the selector engine and
//! `NodeIterator`/`TreeWalker` traversal.

use koala_dom::node::{create_element, new_document};
use koala_dom::selector::{query_selector, query_selector_all};
use koala_dom::traversal::{NodeFilterResult, NodeIterator, WhatToShow};
use koala_dom::{mutation, tree};

fn build_tree() -> (koala_dom::Node, koala_dom::Node) {
    let document = new_document("about:blank", "text/html");
    let container = create_element(&document, "container").unwrap();
    let level1 = create_element(&document, "level1").unwrap();
    let level2 = create_element(&document, "level2").unwrap();
    mutation::append(&container, &level1).unwrap();
    mutation::append(&level1, &level2).unwrap();
    (document, container)
}

#[test]
fn query_selector_finds_the_nested_element() {
    let (_, container) = build_tree();
    let found = query_selector(&container, "level2").unwrap();
    assert_eq!(found.as_ref().map(koala_dom::Node::node_name), Some("level2".to_string()));
}

#[test]
fn query_selector_all_excludes_the_root_and_is_in_tree_order() {
    let (_, container) = build_tree();
    let all = query_selector_all(&container, "*").unwrap();
    let names: Vec<_> = all.iter().map(koala_dom::Node::node_name).collect();
    assert_eq!(names, vec!["level1".to_string(), "level2".to_string()]);
}

#[test]
fn nth_child_odd_and_negative_coefficient_forms() {
    let document = new_document("about:blank", "text/html");
    let ul = create_element(&document, "ul").unwrap();
    let items: Vec<_> = (0..6)
        .map(|_| {
            let li = create_element(&document, "li").unwrap();
            mutation::append(&ul, &li).unwrap();
            li
        })
        .collect();

    let odd = query_selector_all(&ul, "li:nth-child(2n+1)").unwrap();
    assert_eq!(odd, vec![items[0].clone(), items[2].clone(), items[4].clone()]);

    let first_three = query_selector_all(&ul, "li:nth-child(-n+3)").unwrap();
    assert_eq!(first_three, vec![items[0].clone(), items[1].clone(), items[2].clone()]);
}

#[test]
fn node_iterator_reference_survives_removal_of_current_node() {
    let document = new_document("about:blank", "text/html");
    let root = create_element(&document, "root").unwrap();
    let a = create_element(&document, "a").unwrap();
    let b = create_element(&document, "b").unwrap();
    mutation::append(&root, &a).unwrap();
    mutation::append(&root, &b).unwrap();

    let iterator = NodeIterator::new(root.clone(), WhatToShow::ALL, None);
    assert_eq!(iterator.next_node(), Some(root.clone()));
    assert_eq!(iterator.next_node(), Some(a.clone()));

    mutation::remove_child(&root, &a).unwrap();
    assert!(!tree::contains(&root, &a));

    let next = iterator.next_node();
    assert_eq!(next, Some(b));
}

#[test]
fn tree_walker_reject_prunes_the_whole_subtree() {
    let document = new_document("about:blank", "text/html");
    let root = create_element(&document, "root").unwrap();
    let pruned = create_element(&document, "pruned").unwrap();
    let pruned_child = create_element(&document, "pruned-child").unwrap();
    let kept = create_element(&document, "kept").unwrap();
    mutation::append(&root, &pruned).unwrap();
    mutation::append(&pruned, &pruned_child).unwrap();
    mutation::append(&root, &kept).unwrap();

    let pruned_for_filter = pruned.clone();
    let filter: koala_dom::traversal::NodeFilter = std::rc::Rc::new(move |node: &koala_dom::Node| {
        if node == &pruned_for_filter {
            NodeFilterResult::Reject
        } else {
            NodeFilterResult::Accept
        }
    });
    let walker = koala_dom::traversal::TreeWalker::new(root.clone(), WhatToShow::ALL, Some(filter));
    assert_eq!(walker.next_node(), Some(kept));
    assert_eq!(walker.next_node(), None);
}
