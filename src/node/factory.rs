//! `Document`'s node-factory operations (`create_element`,
//! `create_text_node`, `import_node`, ...). [§ 4.5](../index.html).
//!
//! Kept as free functions taking `&Node` rather than methods on a
//! `Document`-only wrapper type, for the same reason the rest of this
//! module does: one `Node` type covers every kind (§3.2), so "the
//! document's factory methods" are just functions that happen to take a
//! document node as their first argument.

use crate::error::DomError;
use crate::node::character_data::{new_cdata_section, new_comment, new_processing_instruction, new_text};
use crate::node::document_fragment::new_document_fragment;
use crate::node::document_type::DocumentTypeData;
use crate::node::element::ElementData;
use crate::node::{intern_in, AttrData, Node, NodeKind, NodeSpecific};

fn pool_intern(document: &Node, s: &str) -> crate::string_pool::Atom {
    intern_in(document, s)
}

/// [§ 4.5 `create_element(local_name)`](../index.html): HTML documents
/// get an implicit `http://www.w3.org/1999/xhtml` namespace; others are
/// created with no namespace, matching `create_element_ns(None, ...)`.
pub fn create_element(document: &Node, local_name: &str) -> Result<Node, DomError> {
    let namespace = document.with_specific(|specific| match specific {
        NodeSpecific::Document(data) if data.is_html_document() => {
            Some("http://www.w3.org/1999/xhtml")
        }
        _ => None,
    });
    create_element_ns(document, namespace, local_name)
}

/// [§ 4.5 `create_element_ns(namespace, qualified_name)`](../index.html)
pub fn create_element_ns(
    document: &Node,
    namespace: Option<&str>,
    qualified_name: &str,
) -> Result<Node, DomError> {
    crate::validation::validate_and_extract(namespace, qualified_name)?;
    let element = document.with_specific(|specific| match specific {
        NodeSpecific::Document(data) => ElementData::new(data.pool(), namespace, qualified_name),
        _ => Err(DomError::InvalidStateError),
    })?;
    let node = Node::new_raw(NodeKind::Element, NodeSpecific::Element(element));
    node.set_owner_document(Some(document));
    Ok(node)
}

/// [§ 4.5 `create_attribute(local_name)`](../index.html)
pub fn create_attribute(document: &Node, local_name: &str) -> Node {
    create_attribute_ns(document, None, local_name).expect("unqualified attribute name is always valid")
}

/// [§ 4.5 `create_attribute_ns(namespace, qualified_name)`](../index.html)
pub fn create_attribute_ns(
    document: &Node,
    namespace: Option<&str>,
    qualified_name: &str,
) -> Result<Node, DomError> {
    let (_, prefix, local) = crate::validation::validate_and_extract(namespace, qualified_name)?;
    let attr = AttrData {
        namespace: namespace.map(|ns| pool_intern(document, ns)),
        prefix: prefix.map(|p| pool_intern(document, &p)),
        local_name: pool_intern(document, &local),
        value: String::new(),
        owner_element: None,
    };
    let node = Node::new_raw(NodeKind::Attr, NodeSpecific::Attr(attr));
    node.set_owner_document(Some(document));
    Ok(node)
}

/// [§ 4.5 `create_text_node(data)`](../index.html)
#[must_use]
pub fn create_text_node(document: &Node, data: &str) -> Node {
    new_text(document, data)
}

/// [§ 4.5 `create_comment(data)`](../index.html)
#[must_use]
pub fn create_comment(document: &Node, data: &str) -> Node {
    new_comment(document, data)
}

/// [§ 4.5 `create_cdata_section(data)`](../index.html): only meaningful
/// for XML documents; callers are responsible for that restriction since
/// this crate does no parsing and has no way to detect document "type"
/// beyond `content_type`.
#[must_use]
pub fn create_cdata_section(document: &Node, data: &str) -> Node {
    new_cdata_section(document, data)
}

/// [§ 4.5 `create_processing_instruction(target, data)`](../index.html)
pub fn create_processing_instruction(
    document: &Node,
    target: &str,
    data: &str,
) -> Result<Node, DomError> {
    if target.is_empty() || data.contains("?>") {
        return Err(DomError::InvalidCharacterError);
    }
    Ok(new_processing_instruction(document, target, data))
}

/// [§ 4.5 `create_document_fragment()`](../index.html)
#[must_use]
pub fn create_document_fragment(document: &Node) -> Node {
    new_document_fragment(document)
}

/// `DOMImplementation::create_document_type(name, public_id, system_id)`:
/// builds a detached `DocumentType` node, used before a document's own
/// `doctype` is inserted.
#[must_use]
pub fn create_document_type(
    document: &Node,
    name: &str,
    public_id: &str,
    system_id: &str,
) -> Node {
    let data = DocumentTypeData {
        name: name.to_string(),
        public_id: public_id.to_string(),
        system_id: system_id.to_string(),
    };
    let node = Node::new_raw(NodeKind::DocumentType, NodeSpecific::DocumentType(data));
    node.set_owner_document(Some(document));
    node
}

/// [§ 4.5 `import_node(node, deep)`](../index.html): a clone, reassigned
/// to this document's pool, never attached to this document's tree.
pub fn import_node(document: &Node, node: &Node, deep: bool) -> Result<Node, DomError> {
    if node.kind() == NodeKind::Document {
        return Err(DomError::NotSupportedError);
    }
    let clone = node.clone_node(deep);
    crate::mutation::adopt(&clone, document);
    Ok(clone)
}

/// [§ 4.5 `adopt_node(node)`](../index.html): moves (not clones) `node`
/// and its subtree into this document, detaching it from any current
/// parent first.
pub fn adopt_node(document: &Node, node: &Node) -> Result<(), DomError> {
    if node.kind() == NodeKind::Document {
        return Err(DomError::NotSupportedError);
    }
    if let Some(parent) = node.parent() {
        crate::mutation::remove_child(&parent, node)?;
    }
    crate::mutation::adopt(node, document);
    Ok(())
}
