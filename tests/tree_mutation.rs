//! End-to-end scenarios from the node tree / mutation engine surface.

use koala_dom::error::DomError;
use koala_dom::mixins::{self, NodeOrString};
use koala_dom::node::{create_element, new_document, split_text};
use koala_dom::{mutation, tree};

fn html_document() -> koala_dom::Node {
    new_document("about:blank", "text/html")
}

#[test]
fn child_list_stays_consistent_through_inserts_and_removes() {
    let document = html_document();
    let parent = create_element(&document, "ul").unwrap();
    let a = create_element(&document, "li").unwrap();
    let b = create_element(&document, "li").unwrap();
    let c = create_element(&document, "li").unwrap();
    mutation::append(&parent, &a).unwrap();
    mutation::append(&parent, &b).unwrap();
    mutation::append(&parent, &c).unwrap();

    assert_eq!(parent.first_child(), Some(a.clone()));
    assert_eq!(parent.last_child(), Some(c.clone()));
    assert_eq!(a.next_sibling(), Some(b.clone()));
    assert_eq!(b.previous_sibling(), Some(a.clone()));
    assert_eq!(c.previous_sibling(), Some(b.clone()));

    mutation::remove_child(&parent, &b).unwrap();
    assert_eq!(a.next_sibling(), Some(c.clone()));
    assert_eq!(c.previous_sibling(), Some(a.clone()));
    assert_eq!(b.parent(), None);
}

#[test]
fn pre_insertion_rejects_a_descendant_cycle() {
    let document = html_document();
    let parent = create_element(&document, "div").unwrap();
    let child = create_element(&document, "span").unwrap();
    mutation::append(&parent, &child).unwrap();
    let err = mutation::append(&child, &parent).unwrap_err();
    assert_eq!(err, DomError::HierarchyRequestError);
}

#[test]
fn pre_insertion_rejects_text_directly_under_document() {
    let document = html_document();
    let text = koala_dom::node::create_text_node(&document, "stray");
    let err = mutation::append(&document, &text).unwrap_err();
    assert_eq!(err, DomError::HierarchyRequestError);
}

#[test]
fn doctype_after_an_element_in_a_document_is_rejected() {
    let document = html_document();
    let html = create_element(&document, "html").unwrap();
    mutation::append(&document, &html).unwrap();
    let doctype = koala_dom::node::create_document_type(&document, "html", "", "");
    let err = mutation::append(&document, &doctype).unwrap_err();
    assert_eq!(err, DomError::HierarchyRequestError);
}

#[test]
fn text_split_preserves_whole_text() {
    let document = html_document();
    let parent = create_element(&document, "p").unwrap();
    let text = koala_dom::node::create_text_node(&document, "Hello World");
    mutation::append(&parent, &text).unwrap();

    let tail = split_text(&text, 6).unwrap();
    assert_eq!(text.text_content(), "Hello ");
    assert_eq!(tail.text_content(), "World");
    assert_eq!(text.next_sibling(), Some(tail.clone()));
    assert_eq!(koala_dom::node::whole_text(&text), "Hello World");
    assert_eq!(koala_dom::node::whole_text(&tail), "Hello World");
}

#[test]
fn replace_children_detaches_old_children_and_attaches_new_ones() {
    let document = html_document();
    let parent = create_element(&document, "div").unwrap();
    let a = create_element(&document, "a").unwrap();
    let b = create_element(&document, "b").unwrap();
    let c = create_element(&document, "c").unwrap();
    mutation::append(&parent, &a).unwrap();
    mutation::append(&parent, &b).unwrap();
    mutation::append(&parent, &c).unwrap();

    let x = create_element(&document, "x").unwrap();
    let y = create_element(&document, "y").unwrap();
    mixins::replace_children(
        &parent,
        vec![
            NodeOrString::Node(x.clone()),
            NodeOrString::Text("text".to_string()),
            NodeOrString::Node(y.clone()),
        ],
    )
    .unwrap();

    let children: Vec<_> = parent.children().collect();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], x);
    assert_eq!(children[1].text_content(), "text");
    assert_eq!(children[2], y);
    assert_eq!(a.parent(), None);
    assert_eq!(b.parent(), None);
    assert_eq!(c.parent(), None);
}

#[test]
fn adopt_reinterns_element_into_new_document_pool() {
    let source = html_document();
    let target = html_document();
    let element = create_element(&source, "custom-tag").unwrap();
    mutation::adopt(&element, &target);
    assert_eq!(element.owner_document(), Some(target));
    assert_eq!(element.node_name(), "custom-tag");
}

#[test]
fn clone_deep_is_equal_node_to_the_original() {
    let document = html_document();
    let parent = create_element(&document, "div").unwrap();
    let child = koala_dom::node::create_text_node(&document, "hi");
    mutation::append(&parent, &child).unwrap();

    let clone = parent.clone_node(true);
    assert!(parent.is_equal_node(&clone));
    assert!(!parent.is_same_node(&clone));
}

#[test]
fn compare_document_position_orders_siblings() {
    let document = html_document();
    let parent = create_element(&document, "div").unwrap();
    let a = create_element(&document, "a").unwrap();
    let b = create_element(&document, "b").unwrap();
    mutation::append(&parent, &a).unwrap();
    mutation::append(&parent, &b).unwrap();

    let position = tree::compare_document_position(&a, &b);
    assert_eq!(position.bits() & tree::DocumentPosition::FOLLOWING, tree::DocumentPosition::FOLLOWING);
    let position = tree::compare_document_position(&b, &a);
    assert_eq!(position.bits() & tree::DocumentPosition::PRECEDING, tree::DocumentPosition::PRECEDING);
}

#[test]
fn normalize_merges_adjacent_text_and_drops_empty_runs() {
    let document = html_document();
    let parent = create_element(&document, "p").unwrap();
    let a = koala_dom::node::create_text_node(&document, "Hello");
    let b = koala_dom::node::create_text_node(&document, "");
    let c = koala_dom::node::create_text_node(&document, " World");
    mutation::append(&parent, &a).unwrap();
    mutation::append(&parent, &b).unwrap();
    mutation::append(&parent, &c).unwrap();

    parent.normalize();

    let children: Vec<_> = parent.children().collect();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].text_content(), "Hello World");
}

#[test]
fn is_connected_reflects_document_membership() {
    let document = html_document();
    let html = create_element(&document, "html").unwrap();
    assert!(!html.is_connected());
    mutation::append(&document, &html).unwrap();
    assert!(html.is_connected());
    mutation::remove_child(&document, &html).unwrap();
    assert!(!html.is_connected());
}

#[test]
fn get_root_node_finds_the_document() {
    let document = html_document();
    let html = create_element(&document, "html").unwrap();
    let body = create_element(&document, "body").unwrap();
    mutation::append(&document, &html).unwrap();
    mutation::append(&html, &body).unwrap();
    assert_eq!(body.get_root_node(false), document);
}

#[test]
fn get_element_by_id_finds_nested_match() {
    let document = html_document();
    let html = create_element(&document, "html").unwrap();
    let body = create_element(&document, "body").unwrap();
    koala_dom::node::set_attribute(&body, "id", "main");
    mutation::append(&document, &html).unwrap();
    mutation::append(&html, &body).unwrap();
    assert_eq!(koala_dom::node::get_element_by_id(&document, "main"), Some(body));
    assert_eq!(koala_dom::node::get_element_by_id(&document, "missing"), None);
}

#[test]
fn fragment_with_one_element_inserts_into_an_empty_document() {
    let document = html_document();
    let fragment = koala_dom::node::new_document_fragment(&document);
    let html = create_element(&document, "html").unwrap();
    mutation::append(&fragment, &html).unwrap();

    mutation::append(&document, &fragment).unwrap();

    assert_eq!(koala_dom::node::document_element(&document), Some(html));
    assert_eq!(fragment.first_child(), None, "the fragment's children move into the document");
}

#[test]
fn fragment_containing_text_is_rejected_as_a_document_child() {
    let document = html_document();
    let fragment = koala_dom::node::new_document_fragment(&document);
    let text = koala_dom::node::create_text_node(&document, "stray");
    mutation::append(&fragment, &text).unwrap();

    let err = mutation::append(&document, &fragment).unwrap_err();
    assert_eq!(err, DomError::HierarchyRequestError);
}

#[test]
fn fragment_mixing_an_element_and_text_is_rejected_as_a_document_child() {
    let document = html_document();
    let fragment = koala_dom::node::new_document_fragment(&document);
    let html = create_element(&document, "html").unwrap();
    let text = koala_dom::node::create_text_node(&document, "stray");
    mutation::append(&fragment, &html).unwrap();
    mutation::append(&fragment, &text).unwrap();

    let err = mutation::append(&document, &fragment).unwrap_err();
    assert_eq!(err, DomError::HierarchyRequestError);
}

#[test]
fn parent_node_element_accessors_ignore_text_siblings() {
    let document = html_document();
    let parent = create_element(&document, "ul").unwrap();
    let text = koala_dom::node::create_text_node(&document, "  ");
    let a = create_element(&document, "li").unwrap();
    let b = create_element(&document, "li").unwrap();
    mutation::append(&parent, &text).unwrap();
    mutation::append(&parent, &a).unwrap();
    mutation::append(&parent, &b).unwrap();

    assert_eq!(mixins::child_element_count(&parent), 2);
    assert_eq!(mixins::first_element_child(&parent), Some(a.clone()));
    assert_eq!(mixins::last_element_child(&parent), Some(b.clone()));
    assert_eq!(mixins::next_element_sibling(&a), Some(b.clone()));
    assert_eq!(mixins::previous_element_sibling(&b), Some(a));
}
