//! Insertion/removal validity and qualified-name/namespace validation.
//!
//! [§ 4.2 Mutation validation](../index.html): "a single validation
//! module... used identically by `insert_before`, `replace_child`,
//! `append_child`, and the `ChildNode`/`ParentNode` mixin methods, so
//! there is exactly one place the hierarchy rules are encoded" (§9 Open
//! Question, resolved in favor of one module rather than duplicating the
//! checks per call site).

use crate::error::DomError;
use crate::node::{Node, NodeKind};

/// [§ 4.2 `ensure_pre_insertion_validity(node, parent, child)`](../index.html)
///
/// Checks that `node` could be inserted into `parent` before the
/// optional reference `child`, without performing the insertion. `child`
/// is `None` for an append.
pub fn ensure_pre_insertion_validity(
    node: &Node,
    parent: &Node,
    child: Option<&Node>,
) -> Result<(), DomError> {
    ensure_parent_accepts_children(parent)?;
    if crate::tree::contains(node, parent) {
        return Err(DomError::HierarchyRequestError);
    }
    if let Some(child) = child {
        if child.parent().as_ref() != Some(parent) {
            return Err(DomError::NotFoundError);
        }
    }
    match node.kind() {
        NodeKind::DocumentFragment | NodeKind::Element | NodeKind::DocumentType => {}
        NodeKind::Text | NodeKind::CDataSection => {
            if parent.kind() == NodeKind::Document {
                return Err(DomError::HierarchyRequestError);
            }
        }
        NodeKind::Comment | NodeKind::ProcessingInstruction => {}
        _ => return Err(DomError::HierarchyRequestError),
    }

    if node.kind() == NodeKind::DocumentFragment {
        let element_children = node.children().filter(|c| c.kind() == NodeKind::Element).count();
        if element_children > 1 {
            return Err(DomError::HierarchyRequestError);
        }
        if parent.kind() == NodeKind::Document {
            let has_text = node
                .children()
                .any(|c| matches!(c.kind(), NodeKind::Text | NodeKind::CDataSection));
            if has_text {
                return Err(DomError::HierarchyRequestError);
            }
            if element_children == 1 {
                ensure_document_accepts_one_more_element(parent, child)?;
            }
        }
    }

    if node.kind() == NodeKind::DocumentType && parent.kind() != NodeKind::Document {
        return Err(DomError::HierarchyRequestError);
    }

    if node.kind() == NodeKind::Element && parent.kind() == NodeKind::Document {
        ensure_document_accepts_one_more_element(parent, child)?;
    }

    Ok(())
}

fn ensure_document_accepts_one_more_element(
    parent: &Node,
    before: Option<&Node>,
) -> Result<(), DomError> {
    let existing = crate::node::document_element(parent);
    match (existing, before) {
        (Some(existing), Some(before)) if &existing == before => Ok(()),
        (Some(_), _) => Err(DomError::HierarchyRequestError),
        (None, _) => Ok(()),
    }
}

fn ensure_parent_accepts_children(parent: &Node) -> Result<(), DomError> {
    match parent.kind() {
        NodeKind::Document | NodeKind::DocumentFragment | NodeKind::Element | NodeKind::ShadowRoot => {
            Ok(())
        }
        _ => Err(DomError::HierarchyRequestError),
    }
}

/// [§ 4.2 `ensure_replace_validity(node, parent, child)`](../index.html):
/// as [`ensure_pre_insertion_validity`], but `child` (the node being
/// replaced) is excluded from the "would create a duplicate root
/// element/doctype" bookkeeping since it is about to be removed anyway.
pub fn ensure_replace_validity(node: &Node, parent: &Node, child: &Node) -> Result<(), DomError> {
    ensure_parent_accepts_children(parent)?;
    if crate::tree::contains(node, parent) {
        return Err(DomError::HierarchyRequestError);
    }
    if child.parent().as_ref() != Some(parent) {
        return Err(DomError::NotFoundError);
    }
    match node.kind() {
        NodeKind::DocumentFragment | NodeKind::Element | NodeKind::DocumentType => {}
        NodeKind::Text | NodeKind::CDataSection => {
            if parent.kind() == NodeKind::Document {
                return Err(DomError::HierarchyRequestError);
            }
        }
        NodeKind::Comment | NodeKind::ProcessingInstruction => {}
        _ => return Err(DomError::HierarchyRequestError),
    }
    if parent.kind() == NodeKind::Document {
        let other_elements = parent
            .children()
            .filter(|c| c.kind() == NodeKind::Element && c != child)
            .count();
        let incoming_elements = if node.kind() == NodeKind::DocumentFragment {
            node.children().filter(|c| c.kind() == NodeKind::Element).count()
        } else {
            usize::from(node.kind() == NodeKind::Element)
        };
        if other_elements > 0 && incoming_elements > 0 {
            return Err(DomError::HierarchyRequestError);
        }
        if incoming_elements > 1 {
            return Err(DomError::HierarchyRequestError);
        }
        let other_doctypes = parent
            .children()
            .filter(|c| c.kind() == NodeKind::DocumentType && c != child)
            .count();
        if node.kind() == NodeKind::DocumentType && other_doctypes > 0 {
            return Err(DomError::HierarchyRequestError);
        }
    }
    Ok(())
}

/// [§ 4.2 `ensure_pre_removal_validity(child, parent)`](../index.html)
pub fn ensure_pre_removal_validity(child: &Node, parent: &Node) -> Result<(), DomError> {
    if child.parent().as_ref() != Some(parent) {
        return Err(DomError::NotFoundError);
    }
    Ok(())
}

/// The XML `Name` production, simplified to what this crate enforces:
/// non-empty, and not starting with a character that can't start a name.
/// Full XML 1.0 `Name`/`NCName` grammar validation is out of this
/// crate's scope (there is no XML parser here) — callers that need
/// strict conformance against a parsed document should validate
/// upstream.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

/// [§ 4.3 `validate_and_extract(namespace, qualified_name)`](../index.html):
/// validates a namespace/qualified-name pair and splits it into
/// `(namespace, prefix, local_name)`, enforcing the `xml`/`xmlns`
/// cross-constraints WHATWG requires of every `*NS` entry point.
pub fn validate_and_extract(
    namespace: Option<&str>,
    qualified_name: &str,
) -> Result<(Option<String>, Option<String>, String), DomError> {
    if !is_valid_name(qualified_name) {
        return Err(DomError::InvalidCharacterError);
    }
    let (prefix, local_name) = match qualified_name.split_once(':') {
        Some((p, l)) if !p.is_empty() && !l.is_empty() && is_valid_name(l) => {
            (Some(p.to_string()), l.to_string())
        }
        Some(_) => return Err(DomError::InvalidCharacterError),
        None => (None, qualified_name.to_string()),
    };
    validate_namespace(namespace, prefix.as_deref(), &local_name)?;
    Ok((namespace.map(str::to_string), prefix, local_name))
}

/// The prefix/namespace cross-constraints from `validate_and_extract`,
/// factored out so `Element::set_attribute_ns` (which already has a split
/// prefix/local name) can reuse them without re-splitting.
///
/// `local_name` is needed alongside `prefix` because the XMLNS
/// cross-constraint is satisfied by *either* a `xmlns` prefix or a bare
/// (unprefixed) qualified name of exactly `xmlns` (§4.3: "the XMLNS
/// namespace requires one of those two names").
pub fn validate_namespace(
    namespace: Option<&str>,
    prefix: Option<&str>,
    local_name: &str,
) -> Result<(), DomError> {
    const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
    const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";
    if prefix.is_some() && namespace.is_none() {
        return Err(DomError::NamespaceError);
    }
    if prefix == Some("xml") && namespace != Some(XML_NS) {
        return Err(DomError::NamespaceError);
    }
    if prefix == Some("xmlns") && namespace != Some(XMLNS_NS) {
        return Err(DomError::NamespaceError);
    }
    let is_xmlns_name = prefix == Some("xmlns") || (prefix.is_none() && local_name == "xmlns");
    if namespace == Some(XMLNS_NS) && !is_xmlns_name {
        return Err(DomError::NamespaceError);
    }
    Ok(())
}
