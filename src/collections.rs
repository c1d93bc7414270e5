//! `NodeList` and `HTMLCollection`: the two collection shapes WHATWG
//! returns from query/traversal APIs. [§ 4.10](../index.html).
//!
//! Both "live" collections here (`ChildNodeList`, `HTMLCollection`) hold
//! nothing but a root `Node` and re-walk the tree on every access,
//! exactly like this crate's `children()` iterator already does — no
//! cached `Vec`, so there is nothing to invalidate when the tree mutates
//! underneath a live handle. `NodeList::snapshot` is the one place a
//! frozen `Vec` is taken, matching `query_selector_all`'s static-list
//! contract.

use crate::node::{Node, NodeKind};

/// A static, ordered collection of nodes — the kind returned by
/// `query_selector_all` and by any other WHATWG operation whose result
/// is a point-in-time snapshot rather than a live view.
#[derive(Debug, Clone, Default)]
pub struct NodeList(Vec<Node>);

impl NodeList {
    /// Wraps an already-collected `Vec` as a frozen snapshot.
    #[must_use]
    pub fn snapshot(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }

    /// [§ 4.10 `length`](../index.html)
    #[must_use]
    pub fn length(&self) -> usize {
        self.0.len()
    }

    /// [§ 4.10 `item(index)`](../index.html)
    #[must_use]
    pub fn item(&self, index: usize) -> Option<Node> {
        self.0.get(index).cloned()
    }

    /// Iterates the snapshot in order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.iter()
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A live view over a single parent's child list (`Node::child_nodes`).
/// `length`/`item` re-walk the sibling chain on every call, so the view
/// never goes stale — it simply reads whatever the chain currently says.
#[derive(Clone)]
pub struct ChildNodeList {
    parent: Node,
}

impl ChildNodeList {
    /// A live view over `parent`'s children.
    #[must_use]
    pub fn new(parent: Node) -> Self {
        Self { parent }
    }

    /// [§ 4.10 `length`](../index.html): O(n), walked fresh each call.
    #[must_use]
    pub fn length(&self) -> usize {
        self.parent.child_count()
    }

    /// [§ 4.10 `item(index)`](../index.html)
    #[must_use]
    pub fn item(&self, index: usize) -> Option<Node> {
        self.parent.children().nth(index)
    }

    /// Iterates the current children in tree order.
    pub fn iter(&self) -> impl Iterator<Item = Node> {
        self.parent.children()
    }
}

/// A live, element-only view, filtered by an optional predicate —
/// `getElementsByTagName`/`getElementsByClassName` and the bare
/// `children` property are all this shape with a different filter.
/// [§ 4.10 `HTMLCollection`](../index.html).
#[derive(Clone)]
pub struct HTMLCollection {
    root: Node,
    filter: CollectionFilter,
}

#[derive(Clone)]
enum CollectionFilter {
    AllElements,
    DirectElementChildren,
    TagName(String),
    ClassNames(Vec<String>),
}

impl HTMLCollection {
    /// Every element descendant of `root` (root itself excluded), in
    /// tree order — `Document::get_elements_by_tag_name("*")` reduces to
    /// this with `filter = AllElements`.
    #[must_use]
    pub fn all_elements(root: Node) -> Self {
        Self { root, filter: CollectionFilter::AllElements }
    }

    /// [§ 6.1 `ParentNode::children`](../index.html): `root`'s own
    /// element children only — not the full descendant subtree
    /// `all_elements` walks.
    #[must_use]
    pub fn direct_children(root: Node) -> Self {
        Self { root, filter: CollectionFilter::DirectElementChildren }
    }

    /// [§ 4.10 `get_elements_by_tag_name(qualified_name)`](../index.html)
    #[must_use]
    pub fn by_tag_name(root: Node, qualified_name: impl Into<String>) -> Self {
        Self { root, filter: CollectionFilter::TagName(qualified_name.into()) }
    }

    /// [§ 4.10 `get_elements_by_class_name(names)`](../index.html): `names`
    /// is split on ASCII whitespace the way the class attribute itself is.
    #[must_use]
    pub fn by_class_name(root: Node, names: &str) -> Self {
        let classes = names.split_ascii_whitespace().map(str::to_string).collect();
        Self { root, filter: CollectionFilter::ClassNames(classes) }
    }

    fn matches(&self, node: &Node) -> bool {
        if node.kind() != NodeKind::Element {
            return false;
        }
        match &self.filter {
            CollectionFilter::AllElements | CollectionFilter::DirectElementChildren => true,
            CollectionFilter::TagName(name) => {
                if name == "*" {
                    return true;
                }
                node.with_specific(|specific| match specific {
                    crate::node::NodeSpecific::Element(element) => {
                        element.tag_name().as_ref() == name.as_str()
                    }
                    _ => false,
                })
            }
            CollectionFilter::ClassNames(classes) => node.with_specific(|specific| match specific {
                crate::node::NodeSpecific::Element(element) => classes
                    .iter()
                    .all(|wanted| element.class_list().iter().any(|c| c.as_ref() == wanted.as_str())),
                _ => false,
            }),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Node> + '_> {
        match &self.filter {
            CollectionFilter::DirectElementChildren => {
                Box::new(self.root.children().filter(move |node| self.matches(node)))
            }
            _ => Box::new(crate::tree::pre_order(&self.root).skip(1).filter(move |node| self.matches(node))),
        }
    }

    /// [§ 4.10 `length`](../index.html): walked fresh each call.
    #[must_use]
    pub fn length(&self) -> usize {
        self.iter().count()
    }

    /// [§ 4.10 `item(index)`](../index.html)
    #[must_use]
    pub fn item(&self, index: usize) -> Option<Node> {
        self.iter().nth(index)
    }

    /// [§ 4.10 `named_item(name)`](../index.html): the first element
    /// whose `id` or (for HTML documents) `name` attribute equals `name`.
    #[must_use]
    pub fn named_item(&self, name: &str) -> Option<Node> {
        self.iter().find(|node| {
            node.with_specific(|specific| match specific {
                crate::node::NodeSpecific::Element(element) => {
                    element.id() == Some(name) || element.get_attribute("name") == Some(name)
                }
                _ => false,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{create_element, new_document};

    #[test]
    fn child_node_list_reflects_live_mutations() {
        let document = new_document("about:blank", "application/xml");
        let parent = create_element(&document, "parent").unwrap();
        let child = create_element(&document, "child").unwrap();
        let list = ChildNodeList::new(parent.clone());
        assert_eq!(list.length(), 0);
        crate::mutation::append(&parent, &child).unwrap();
        assert_eq!(list.length(), 1);
        assert_eq!(list.item(0), Some(child));
    }

    #[test]
    fn html_collection_filters_by_tag_name() {
        let document = new_document("about:blank", "text/html");
        let root = create_element(&document, "root").unwrap();
        let div = create_element(&document, "div").unwrap();
        let span = create_element(&document, "span").unwrap();
        crate::mutation::append(&root, &div).unwrap();
        crate::mutation::append(&root, &span).unwrap();
        let divs = HTMLCollection::by_tag_name(root, "div");
        assert_eq!(divs.length(), 1);
    }

    #[test]
    fn direct_children_excludes_grandchildren() {
        let document = new_document("about:blank", "text/html");
        let root = create_element(&document, "root").unwrap();
        let div = create_element(&document, "div").unwrap();
        let grandchild = create_element(&document, "span").unwrap();
        crate::mutation::append(&root, &div).unwrap();
        crate::mutation::append(&div, &grandchild).unwrap();
        let children = HTMLCollection::direct_children(root);
        assert_eq!(children.length(), 1);
        assert_eq!(children.item(0), Some(div));
    }
}
