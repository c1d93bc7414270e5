//! The node base: kind tag, sibling/child links, weak parent, dispatch.
//!
//! [§ 4.1 Node base and dispatch](../index.html)
//!
//! Every node in the tree is addressed through [`Node`], a cheap-to-clone
//! strong handle (an `Rc` newtype) paired with [`WeakNode`] for the
//! upward/backward links that would otherwise form reference cycles.
//! The base struct ([`NodeRepr`]) carries the kind tag and the
//! intrusive sibling/child list; kind-specific state lives in
//! [`NodeSpecific`], a sum type matched by every dispatch operation
//! (`node_name`, `node_value`, `clone`, `adopting_steps`) instead of a
//! vtable.

mod attr;
mod character_data;
mod document;
mod document_fragment;
mod document_type;
mod element;
mod factory;

pub use attr::AttrData;
pub use character_data::{
    append_data, data, delete_data, insert_data, length, new_text, replace_data, split_text,
    substring_data, whole_text, CharacterDataPayload,
};
pub use document::{body, document_element, get_element_by_id, head, new_document, CompatMode, DocumentData};
pub(crate) use document::{intern_in, notify_iterators_removed, register_iterator};
pub use document_fragment::{new_document_fragment, DocumentFragmentData, ShadowRootData};
pub use document_type::DocumentTypeData;
pub use element::{
    class_list, closest, get_attribute, get_attribute_ns, has_attribute, id, matches,
    remove_attribute, set_attribute, set_attribute_ns, tag_name, toggle_attribute, AttributeRecord,
    ElementData,
};
pub use factory::{
    adopt_node, create_attribute, create_attribute_ns, create_cdata_section, create_comment,
    create_document_fragment, create_document_type, create_element, create_element_ns,
    create_processing_instruction, create_text_node, import_node,
};

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::DomError;
use crate::event::ListenerTable;
use crate::observer::ObserverRegistration;
use crate::rare_data::RareData;

/// [§ 3.1 Node kinds and identity](../index.html)
///
/// Numeric values match the WHATWG `nodeType` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeKind {
    /// An element, e.g. `<div>`.
    Element = 1,
    /// An attribute, when reified as its own node (`Document::create_attribute`).
    Attr = 2,
    /// A run of character data.
    Text = 3,
    /// A `<![CDATA[ ... ]]>` section (XML documents only).
    CDataSection = 4,
    /// `<?target data?>`.
    ProcessingInstruction = 7,
    /// `<!-- ... -->`.
    Comment = 8,
    /// The root of a document tree.
    Document = 9,
    /// `<!DOCTYPE ...>`.
    DocumentType = 10,
    /// An unattached container used to batch-insert a run of children.
    DocumentFragment = 11,
    /// The root of a shadow tree.
    ShadowRoot = 13,
}

/// [§ 3.2 Per-kind payload](../index.html)
///
/// The sum type over every node kind's specific state. Matched instead of
/// dispatched through a vtable — no mutable global state is required.
pub enum NodeSpecific {
    /// See [`DocumentData`].
    Document(DocumentData),
    /// See [`DocumentFragmentData`].
    DocumentFragment(DocumentFragmentData),
    /// See [`ShadowRootData`].
    ShadowRoot(ShadowRootData),
    /// See [`DocumentTypeData`].
    DocumentType(DocumentTypeData),
    /// See [`ElementData`].
    Element(ElementData),
    /// See [`AttrData`].
    Attr(AttrData),
    /// Text node data.
    Text(CharacterDataPayload),
    /// CDATA section data.
    CDataSection(CharacterDataPayload),
    /// Comment data.
    Comment(CharacterDataPayload),
    /// Processing instruction data (target + character data).
    ProcessingInstruction {
        /// The PI's target name, e.g. `xml-stylesheet`.
        target: String,
        /// The PI's character data.
        data: CharacterDataPayload,
    },
}

/// The common, always-present part of every node.
///
/// [§ 3.1](../index.html): "a weak parent pointer, a weak owner-document
/// pointer, and intrusive `previous_sibling`/`next_sibling`/`first_child`/
/// `last_child` links (doubly-linked child list, singly-linked upward)."
///
/// `first_child` and `next_sibling` are strong (`Node`): together they
/// form the chain that keeps a subtree alive once it is attached. Every
/// other link (`parent`, `previous_sibling`, `last_child`,
/// `owner_document`) is weak — an asymmetric strong/weak split that
/// avoids reference cycles while keeping a subtree alive through its
/// `first_child`/`next_sibling` chain alone.
pub struct NodeRepr {
    kind: NodeKind,
    specific: RefCell<NodeSpecific>,
    generation: Cell<u64>,
    parent: RefCell<Option<WeakNode>>,
    owner_document: RefCell<Option<WeakNode>>,
    previous_sibling: RefCell<Option<WeakNode>>,
    next_sibling: RefCell<Option<Node>>,
    first_child: RefCell<Option<Node>>,
    last_child: RefCell<Option<WeakNode>>,
    rare: RefCell<Option<Box<RareData>>>,
}

/// A strong, cheap-to-clone handle to a node.
///
/// [§ 3.4 Ownership and lifetime invariants](../index.html): cloning a
/// `Node` is an external reference held alongside the tree's own
/// internal strong links; a node is destroyed the instant its last
/// `Node`/tree-internal strong link is dropped.
#[derive(Clone)]
pub struct Node(Rc<NodeRepr>);

/// A non-owning handle to a node, upgraded with [`WeakNode::upgrade`].
///
/// Used for every non-owning link in the tree: parent, previous sibling,
/// last child, owner document, and (for `Attr`) the owning element.
#[derive(Clone, Default)]
pub struct WeakNode(Option<Weak<NodeRepr>>);

impl WeakNode {
    /// The empty weak handle (equivalent to a null pointer).
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    /// Attempts to upgrade to a strong [`Node`], returning `None` if the
    /// referent has already been destroyed.
    #[must_use]
    pub fn upgrade(&self) -> Option<Node> {
        self.0.as_ref().and_then(Weak::upgrade).map(Node)
    }
}

impl PartialEq for Node {
    /// [§ 6.1 `is_same_node`](../index.html): identity, not structural,
    /// equality.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Node {}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("node_name", &self.node_name())
            .finish()
    }
}

impl Node {
    /// Allocates a new, detached node of the given kind/payload.
    pub(crate) fn new_raw(kind: NodeKind, specific: NodeSpecific) -> Self {
        Self(Rc::new(NodeRepr {
            kind,
            specific: RefCell::new(specific),
            generation: Cell::new(0),
            parent: RefCell::new(None),
            owner_document: RefCell::new(None),
            previous_sibling: RefCell::new(None),
            next_sibling: RefCell::new(None),
            first_child: RefCell::new(None),
            last_child: RefCell::new(None),
            rare: RefCell::new(None),
        }))
    }

    /// Creates a weak handle to this node.
    #[must_use]
    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Some(Rc::downgrade(&self.0)))
    }

    /// A stable, arbitrary ordering key for this node's identity. Used
    /// only to give disconnected-tree `compare_document_position` calls a
    /// consistent (if otherwise meaningless) order, per spec.
    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// [§ 3.1](../index.html) The node's immutable kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.0.kind
    }

    /// Matches the WHATWG `nodeType` integer constant for this kind.
    #[must_use]
    pub fn node_type(&self) -> u16 {
        self.0.kind as u16
    }

    /// Read-only access to the kind-specific payload.
    pub fn with_specific<R>(&self, f: impl FnOnce(&NodeSpecific) -> R) -> R {
        f(&self.0.specific.borrow())
    }

    /// Mutable access to the kind-specific payload. Bumps the generation
    /// counter: callers use this for any operation that changes observable
    /// content (§3.1: "incremented on every observable mutation of the
    /// node's own content").
    pub fn with_specific_mut<R>(&self, f: impl FnOnce(&mut NodeSpecific) -> R) -> R {
        self.bump_generation();
        f(&mut self.0.specific.borrow_mut())
    }

    /// The staleness hint described in §3.1. Not load-bearing for
    /// correctness; cached views may use it to decide whether to
    /// recompute.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.0.generation.get()
    }

    pub(crate) fn bump_generation(&self) {
        self.0.generation.set(self.0.generation.get().wrapping_add(1));
    }

    /// [§ 4.4 `parent`](../index.html)
    #[must_use]
    pub fn parent(&self) -> Option<Node> {
        self.0.parent.borrow().as_ref().and_then(WeakNode::upgrade)
    }

    pub(crate) fn set_parent(&self, parent: Option<&Node>) {
        *self.0.parent.borrow_mut() = parent.map(Node::downgrade);
    }

    /// [§ 4.4 `owner_document`](../index.html)
    #[must_use]
    pub fn owner_document(&self) -> Option<Node> {
        self.0
            .owner_document
            .borrow()
            .as_ref()
            .and_then(WeakNode::upgrade)
    }

    pub(crate) fn set_owner_document(&self, doc: Option<&Node>) {
        *self.0.owner_document.borrow_mut() = doc.map(Node::downgrade);
    }

    /// [§ 4.4 `first_child`](../index.html)
    #[must_use]
    pub fn first_child(&self) -> Option<Node> {
        self.0.first_child.borrow().clone()
    }

    pub(crate) fn set_first_child(&self, child: Option<Node>) {
        *self.0.first_child.borrow_mut() = child;
    }

    /// [§ 4.4 `last_child`](../index.html)
    #[must_use]
    pub fn last_child(&self) -> Option<Node> {
        self.0.last_child.borrow().as_ref().and_then(WeakNode::upgrade)
    }

    pub(crate) fn set_last_child(&self, child: Option<&Node>) {
        *self.0.last_child.borrow_mut() = child.map(Node::downgrade);
    }

    /// [§ 4.4 `next_sibling`](../index.html)
    #[must_use]
    pub fn next_sibling(&self) -> Option<Node> {
        self.0.next_sibling.borrow().clone()
    }

    pub(crate) fn set_next_sibling(&self, sibling: Option<Node>) {
        *self.0.next_sibling.borrow_mut() = sibling;
    }

    /// [§ 4.4 `previous_sibling`](../index.html)
    #[must_use]
    pub fn previous_sibling(&self) -> Option<Node> {
        self.0
            .previous_sibling
            .borrow()
            .as_ref()
            .and_then(WeakNode::upgrade)
    }

    pub(crate) fn set_previous_sibling(&self, sibling: Option<&Node>) {
        *self.0.previous_sibling.borrow_mut() = sibling.map(Node::downgrade);
    }

    /// Live iterator over this node's children in tree order.
    ///
    /// [§ 4.10 `ChildNodeList`](../index.html): "a view over a parent's
    /// child linked list; O(n) length and item(i). No storage—just a
    /// parent pointer." This iterator reads the live chain directly; it
    /// observes mutations made after it was created but before it was
    /// advanced past the mutated point.
    #[must_use]
    pub fn children(&self) -> ChildrenIter {
        ChildrenIter { next: self.first_child() }
    }

    /// Number of children (§6.1 `child_element_count` uses the
    /// element-filtered variant; this is the raw count).
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children().count()
    }

    /// Ensures the rare-data block is allocated and returns a mutable
    /// reference to it. [§ 3.3](../index.html): "Rare data is created on
    /// first need."
    pub(crate) fn ensure_rare(&self) -> std::cell::RefMut<'_, Box<RareData>> {
        {
            let mut slot = self.0.rare.borrow_mut();
            if slot.is_none() {
                *slot = Some(Box::new(RareData::default()));
            }
        }
        std::cell::RefMut::map(self.0.rare.borrow_mut(), |opt| opt.as_mut().unwrap())
    }

    /// Read-only access to the rare-data block, if allocated.
    pub(crate) fn rare(&self) -> std::cell::Ref<'_, Option<Box<RareData>>> {
        self.0.rare.borrow()
    }

    /// Drops the rare-data block if every field in it is at its default,
    /// so a node that briefly needed rare state (e.g. one listener added
    /// then removed) doesn't keep paying for the allocation forever.
    pub(crate) fn compact_rare(&self) {
        let mut slot = self.0.rare.borrow_mut();
        if slot.as_deref().is_some_and(RareData::is_empty) {
            *slot = None;
        }
    }

    pub(crate) fn listener_table(&self) -> std::cell::RefMut<'_, ListenerTable> {
        std::cell::RefMut::map(self.ensure_rare(), |rare| &mut rare.listeners)
    }

    pub(crate) fn observer_registrations_mut(&self) -> std::cell::RefMut<'_, Vec<ObserverRegistration>> {
        std::cell::RefMut::map(self.ensure_rare(), |rare| &mut rare.observers)
    }

    /// [§ 4.1 `node_name`](../index.html)
    #[must_use]
    pub fn node_name(&self) -> String {
        match &*self.0.specific.borrow() {
            NodeSpecific::Document(_) => "#document".to_string(),
            NodeSpecific::DocumentFragment(_) => "#document-fragment".to_string(),
            NodeSpecific::ShadowRoot(_) => "#shadow-root".to_string(),
            NodeSpecific::DocumentType(d) => d.name.clone(),
            NodeSpecific::Element(e) => e.tag_name().to_string(),
            NodeSpecific::Attr(a) => a.name(),
            NodeSpecific::Text(_) => "#text".to_string(),
            NodeSpecific::CDataSection(_) => "#cdata-section".to_string(),
            NodeSpecific::Comment(_) => "#comment".to_string(),
            NodeSpecific::ProcessingInstruction { target, .. } => target.clone(),
        }
    }

    /// [§ 4.1 `node_value` getter](../index.html)
    #[must_use]
    pub fn node_value(&self) -> Option<String> {
        match &*self.0.specific.borrow() {
            NodeSpecific::Text(d) | NodeSpecific::CDataSection(d) | NodeSpecific::Comment(d) => {
                Some(d.data().to_string())
            }
            NodeSpecific::ProcessingInstruction { data, .. } => Some(data.data().to_string()),
            NodeSpecific::Attr(a) => Some(a.value.clone()),
            _ => None,
        }
    }

    /// [§ 4.1 `node_value` setter](../index.html). For the `CharacterData`
    /// kinds this goes through [`character_data::set_data`], so it queues
    /// a mutation record the same as calling `set_data` directly would.
    pub fn set_node_value(&self, value: Option<&str>) {
        match self.kind() {
            NodeKind::Text | NodeKind::CDataSection | NodeKind::Comment | NodeKind::ProcessingInstruction => {
                character_data::set_data(self, value.unwrap_or(""));
            }
            NodeKind::Attr => {
                self.bump_generation();
                if let NodeSpecific::Attr(a) = &mut *self.0.specific.borrow_mut() {
                    a.value = value.unwrap_or("").to_string();
                }
            }
            _ => {}
        }
    }

    /// [§ 6.1 `text_content` getter](../index.html): concatenates
    /// descendant text.
    #[must_use]
    pub fn text_content(&self) -> String {
        match &*self.0.specific.borrow() {
            NodeSpecific::Text(d) | NodeSpecific::CDataSection(d) | NodeSpecific::Comment(d) => {
                d.data().to_string()
            }
            NodeSpecific::ProcessingInstruction { data, .. } => data.data().to_string(),
            NodeSpecific::DocumentType(_) | NodeSpecific::Document(_) => String::new(),
            _ => {
                drop(self.0.specific.borrow());
                let mut out = String::new();
                collect_text(self, &mut out);
                out
            }
        }
    }

    /// [§ 6.1 `text_content` setter](../index.html): "set replaces
    /// children with a single Text" (no-op for kinds with no children
    /// concept, e.g. character data, where it behaves as `node_value`).
    pub fn set_text_content(&self, value: &str) {
        match self.kind() {
            NodeKind::Text | NodeKind::CDataSection | NodeKind::Comment | NodeKind::ProcessingInstruction => {
                self.set_node_value(Some(value));
            }
            NodeKind::DocumentType | NodeKind::Document => {}
            _ => {
                for child in self.children().collect::<Vec<_>>() {
                    crate::mutation::remove_child(self, &child).expect("child.parent == self");
                }
                if !value.is_empty() {
                    let doc = self.owner_document().unwrap_or_else(|| self.clone());
                    let text = crate::node::character_data::new_text(&doc, value);
                    crate::mutation::append(self, &text).expect("fresh text node always inserts");
                }
            }
        }
    }

    /// [§ 4.1 `clone(deep)`](../index.html)
    ///
    /// "Contract: `clone(deep)` yields a detached new node with fresh
    /// refcount=1, same owner-document, duplicated payload, and—if
    /// deep—recursively cloned descendants."
    #[must_use]
    pub fn clone_node(&self, deep: bool) -> Node {
        let specific_clone = self.0.specific.borrow().shallow_clone();
        let clone = Node::new_raw(self.kind(), specific_clone);
        clone.set_owner_document(self.owner_document().as_ref());
        if deep {
            for child in self.children() {
                let child_clone = child.clone_node(true);
                crate::mutation::append(&clone, &child_clone)
                    .expect("a freshly cloned node accepts any child its source accepted");
            }
        }
        clone
    }

    /// [§ 4.1 `adopting_steps`](../index.html), invoked by
    /// [`crate::mutation::adopt`] after `owner_document` has been
    /// updated.
    pub(crate) fn run_adopting_steps(&self, new_document: &Node) {
        if let NodeSpecific::Element(element) = &mut *self.0.specific.borrow_mut() {
            element.reintern_names(new_document);
        }
    }

    /// [§ 8 round-trip law](../index.html): structural equality ignoring
    /// identity, refcounts, and generation.
    #[must_use]
    pub fn is_equal_node(&self, other: &Node) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        if !self.0.specific.borrow().equal_payload(&other.0.specific.borrow()) {
            return false;
        }
        let mut a = self.children();
        let mut b = other.children();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x.is_equal_node(&y) => continue,
                _ => return false,
            }
        }
    }

    /// [§ 6.1 `is_same_node`](../index.html): identity.
    #[must_use]
    pub fn is_same_node(&self, other: &Node) -> bool {
        self == other
    }

    /// [§ 6.1 `get_root_node(composed?)`](../index.html): the furthest
    /// ancestor of `self`. With `composed`, a `ShadowRoot` root keeps
    /// climbing through its host into the host's own tree, per §3.4's
    /// "extended to cross shadow-host boundaries" rule — otherwise a
    /// shadow tree's root is the `ShadowRoot` itself.
    #[must_use]
    pub fn get_root_node(&self, composed: bool) -> Node {
        let mut cursor = crate::tree::root_of(self);
        if composed {
            while cursor.kind() == NodeKind::ShadowRoot {
                let host = cursor.with_specific(|specific| match specific {
                    NodeSpecific::ShadowRoot(shadow) => shadow.host.upgrade(),
                    _ => None,
                });
                match host {
                    Some(host) => cursor = crate::tree::root_of(&host),
                    None => break,
                }
            }
        }
        cursor
    }

    /// [§ 3.4 `is_connected`](../index.html): "connectivity... iff the
    /// tree root is a Document or ShadowRoot (for ShadowRoot, connectivity
    /// is relative to the shadow host)." A `ShadowRoot` is only connected
    /// if its host is itself connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let root = crate::tree::root_of(self);
        match root.kind() {
            NodeKind::Document => true,
            NodeKind::ShadowRoot => root
                .with_specific(|specific| match specific {
                    NodeSpecific::ShadowRoot(shadow) => shadow.host.upgrade(),
                    _ => None,
                })
                .is_some_and(|host| host.is_connected()),
            _ => false,
        }
    }

    /// [§ 6.1 `normalize()`](../index.html): merges each run of adjacent
    /// `Text` descendants into the first node of the run and removes any
    /// `Text` node left empty, recursively over the whole subtree.
    pub fn normalize(&self) {
        let mut child = self.first_child();
        while let Some(current) = child {
            if current.kind() != NodeKind::Text {
                current.normalize();
                child = current.next_sibling();
                continue;
            }
            let mut run_next = current.next_sibling();
            while let Some(sibling) = run_next.filter(|s| s.kind() == NodeKind::Text) {
                let sibling_data = sibling.with_specific(|specific| match specific {
                    NodeSpecific::Text(d) => d.data().to_string(),
                    _ => String::new(),
                });
                current.with_specific_mut(|specific| {
                    if let NodeSpecific::Text(d) = specific {
                        let mut merged = d.data().to_string();
                        merged.push_str(&sibling_data);
                        d.set_data(&merged);
                    }
                });
                let after_sibling = sibling.next_sibling();
                crate::mutation::remove_child(self, &sibling)
                    .expect("sibling.parent() == self by construction");
                run_next = after_sibling;
            }
            let is_empty = current
                .with_specific(|specific| matches!(specific, NodeSpecific::Text(d) if d.data().is_empty()));
            if is_empty {
                let after = current.next_sibling();
                crate::mutation::remove_child(self, &current)
                    .expect("current.parent() == self by construction");
                child = after;
            } else {
                child = current.next_sibling();
            }
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    for child in node.children() {
        match &*child.0.specific.borrow() {
            NodeSpecific::Text(d) | NodeSpecific::CDataSection(d) => out.push_str(d.data()),
            NodeSpecific::Comment(_) | NodeSpecific::ProcessingInstruction { .. } => {}
            _ => {
                drop(child.0.specific.borrow());
                collect_text(&child, out);
            }
        }
    }
}

impl NodeSpecific {
    fn shallow_clone(&self) -> NodeSpecific {
        match self {
            NodeSpecific::Document(d) => NodeSpecific::Document(d.shallow_clone()),
            NodeSpecific::DocumentFragment(d) => NodeSpecific::DocumentFragment(d.clone()),
            NodeSpecific::ShadowRoot(d) => NodeSpecific::ShadowRoot(d.clone()),
            NodeSpecific::DocumentType(d) => NodeSpecific::DocumentType(d.clone()),
            NodeSpecific::Element(e) => NodeSpecific::Element(e.shallow_clone()),
            NodeSpecific::Attr(a) => NodeSpecific::Attr(a.clone()),
            NodeSpecific::Text(d) => NodeSpecific::Text(d.clone()),
            NodeSpecific::CDataSection(d) => NodeSpecific::CDataSection(d.clone()),
            NodeSpecific::Comment(d) => NodeSpecific::Comment(d.clone()),
            NodeSpecific::ProcessingInstruction { target, data } => {
                NodeSpecific::ProcessingInstruction { target: target.clone(), data: data.clone() }
            }
        }
    }

    fn equal_payload(&self, other: &NodeSpecific) -> bool {
        match (self, other) {
            (NodeSpecific::Document(_), NodeSpecific::Document(_))
            | (NodeSpecific::DocumentFragment(_), NodeSpecific::DocumentFragment(_))
            | (NodeSpecific::ShadowRoot(_), NodeSpecific::ShadowRoot(_)) => true,
            (NodeSpecific::DocumentType(a), NodeSpecific::DocumentType(b)) => {
                a.name == b.name && a.public_id == b.public_id && a.system_id == b.system_id
            }
            (NodeSpecific::Element(a), NodeSpecific::Element(b)) => a.equal_payload(b),
            (NodeSpecific::Attr(a), NodeSpecific::Attr(b)) => {
                a.namespace == b.namespace && a.local_name == b.local_name && a.value == b.value
            }
            (NodeSpecific::Text(a), NodeSpecific::Text(b))
            | (NodeSpecific::CDataSection(a), NodeSpecific::CDataSection(b))
            | (NodeSpecific::Comment(a), NodeSpecific::Comment(b)) => a.data() == b.data(),
            (
                NodeSpecific::ProcessingInstruction { target: t1, data: d1 },
                NodeSpecific::ProcessingInstruction { target: t2, data: d2 },
            ) => t1 == t2 && d1.data() == d2.data(),
            _ => false,
        }
    }
}

/// Iterator over a node's children, returned by [`Node::children`].
pub struct ChildrenIter {
    next: Option<Node>,
}

impl Iterator for ChildrenIter {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let current = self.next.take()?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// Extracts `(namespace, prefix, local_name)` from a document-supplied
/// qualified name, used by every `create_element_ns`/`create_attribute_ns`
/// entry point. See [`crate::validation::validate_and_extract`] for the
/// actual rule set (§4.3).
pub fn split_qualified_name(qualified_name: &str) -> Result<(Option<String>, String), DomError> {
    match qualified_name.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
            Ok((Some(prefix.to_string()), local.to_string()))
        }
        Some(_) => Err(DomError::InvalidCharacterError),
        None => Ok((None, qualified_name.to_string())),
    }
}
