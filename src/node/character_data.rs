//! Shared payload for `Text`, `Comment`, `CDATASection`, and the data half
//! of `ProcessingInstruction` (§4.5 Character-data operations).

use crate::error::DomError;
use crate::node::{Node, NodeKind, NodeSpecific};
use crate::observer::{self, MutationRecordKind};

/// A run of character data plus the substring operations §4.5 defines
/// (`substring_data`, `append_data`, `insert_data`, `delete_data`,
/// `replace_data`), all indexed in UTF-16 code units per the Web IDL
/// `DOMString` contract even though the backing storage is UTF-8.
///
/// [§ 4.5 Edge case](../index.html): "offsets and lengths are measured in
/// UTF-16 code units (the DOMString contract), not bytes or Unicode
/// scalar values, even though storage is UTF-8 internally. Implementers
/// must convert carefully at the boundary."
#[derive(Clone, Default)]
pub struct CharacterDataPayload {
    data: String,
}

impl CharacterDataPayload {
    /// Wraps an initial string.
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// The current data, as UTF-8.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Replaces the data wholesale (`node_value`/`data` setter).
    pub fn set_data(&mut self, value: &str) {
        self.data = value.to_string();
    }

    /// Length in UTF-16 code units, per the `DOMString` contract.
    #[must_use]
    pub fn length_utf16(&self) -> u32 {
        self.data.encode_utf16().count() as u32
    }

    /// [§ 4.5 `substring_data(offset, count)`](../index.html)
    pub fn substring_data(&self, offset: u32, count: u32) -> Result<String, DomError> {
        let units: Vec<u16> = self.data.encode_utf16().collect();
        let offset = offset as usize;
        if offset > units.len() {
            return Err(DomError::IndexSizeError);
        }
        let end = units.len().min(offset + count as usize);
        String::from_utf16(&units[offset..end]).map_err(|_| DomError::IndexSizeError)
    }

    /// [§ 4.5 `replace_data(offset, count, data)`](../index.html): used to
    /// implement `append_data`/`insert_data`/`delete_data`, each a
    /// special case of this same splice.
    pub fn replace_data(&mut self, offset: u32, count: u32, data: &str) -> Result<(), DomError> {
        let units: Vec<u16> = self.data.encode_utf16().collect();
        let offset = offset as usize;
        if offset > units.len() {
            return Err(DomError::IndexSizeError);
        }
        let end = units.len().min(offset + count as usize);
        let mut next: Vec<u16> = units[..offset].to_vec();
        next.extend(data.encode_utf16());
        next.extend_from_slice(&units[end..]);
        self.data = String::from_utf16(&next).map_err(|_| DomError::IndexSizeError)?;
        Ok(())
    }

    /// [§ 4.5 `append_data(data)`](../index.html)
    pub fn append_data(&mut self, data: &str) {
        self.data.push_str(data);
    }

    /// [§ 4.5 `insert_data(offset, data)`](../index.html)
    pub fn insert_data(&mut self, offset: u32, data: &str) -> Result<(), DomError> {
        self.replace_data(offset, 0, data)
    }

    /// [§ 4.5 `delete_data(offset, count)`](../index.html)
    pub fn delete_data(&mut self, offset: u32, count: u32) -> Result<(), DomError> {
        self.replace_data(offset, count, "")
    }
}

fn with_payload<R>(node: &Node, f: impl FnOnce(&CharacterDataPayload) -> R) -> R {
    node.with_specific(|specific| match specific {
        NodeSpecific::Text(data) | NodeSpecific::CDataSection(data) | NodeSpecific::Comment(data) => f(data),
        NodeSpecific::ProcessingInstruction { data, .. } => f(data),
        _ => panic!("called a CharacterData-only operation on a non-CharacterData node"),
    })
}

fn with_payload_mut<R>(node: &Node, f: impl FnOnce(&mut CharacterDataPayload) -> R) -> R {
    node.with_specific_mut(|specific| match specific {
        NodeSpecific::Text(data) | NodeSpecific::CDataSection(data) | NodeSpecific::Comment(data) => f(data),
        NodeSpecific::ProcessingInstruction { data, .. } => f(data),
        _ => panic!("called a CharacterData-only operation on a non-CharacterData node"),
    })
}

/// [§ 4.5 `CharacterData::data`](../index.html)
#[must_use]
pub fn data(node: &Node) -> String {
    with_payload(node, |p| p.data().to_string())
}

/// [§ 4.5 `CharacterData::length`](../index.html): length in UTF-16 code
/// units, per the `DOMString` contract.
#[must_use]
pub fn length(node: &Node) -> u32 {
    with_payload(node, CharacterDataPayload::length_utf16)
}

/// [§ 4.5 `data` setter](../index.html). [§ 4.13](../index.html): queues a
/// `CharacterData` mutation record unconditionally, mirroring
/// `Element::set_attribute`'s unconditional-queue contract.
pub fn set_data(node: &Node, value: &str) {
    let old_value = data(node);
    with_payload_mut(node, |p| p.set_data(value));
    observer::record_mutation(node, MutationRecordKind::CharacterData { old_value: Some(old_value) });
}

/// [§ 4.5 `substring_data(offset, count)`](../index.html)
///
/// # Errors
/// Returns [`DomError::IndexSizeError`] if `offset` exceeds the node's
/// length.
pub fn substring_data(node: &Node, offset: u32, count: u32) -> Result<String, DomError> {
    with_payload(node, |p| p.substring_data(offset, count))
}

/// [§ 4.5 `replace_data(offset, count, data)`](../index.html)
///
/// # Errors
/// Returns [`DomError::IndexSizeError`] if `offset` exceeds the node's
/// length.
pub fn replace_data(node: &Node, offset: u32, count: u32, value: &str) -> Result<(), DomError> {
    let old_value = data(node);
    with_payload_mut(node, |p| p.replace_data(offset, count, value))?;
    observer::record_mutation(node, MutationRecordKind::CharacterData { old_value: Some(old_value) });
    Ok(())
}

/// [§ 4.5 `append_data(data)`](../index.html)
pub fn append_data(node: &Node, value: &str) {
    let old_value = data(node);
    with_payload_mut(node, |p| p.append_data(value));
    observer::record_mutation(node, MutationRecordKind::CharacterData { old_value: Some(old_value) });
}

/// [§ 4.5 `insert_data(offset, data)`](../index.html)
///
/// # Errors
/// Returns [`DomError::IndexSizeError`] if `offset` exceeds the node's
/// length.
pub fn insert_data(node: &Node, offset: u32, value: &str) -> Result<(), DomError> {
    replace_data(node, offset, 0, value)
}

/// [§ 4.5 `delete_data(offset, count)`](../index.html)
///
/// # Errors
/// Returns [`DomError::IndexSizeError`] if `offset` exceeds the node's
/// length.
pub fn delete_data(node: &Node, offset: u32, count: u32) -> Result<(), DomError> {
    replace_data(node, offset, count, "")
}

/// Builds a detached `Text` node owned by `document`, used internally by
/// [`Node::set_text_content`](crate::node::Node::set_text_content) and
/// exposed publicly as `Document::create_text_node`.
#[must_use]
pub fn new_text(document: &Node, value: &str) -> Node {
    let node = Node::new_raw(NodeKind::Text, NodeSpecific::Text(CharacterDataPayload::new(value)));
    node.set_owner_document(Some(document));
    node
}

/// Builds a detached `Comment` node owned by `document`.
#[must_use]
pub fn new_comment(document: &Node, value: &str) -> Node {
    let node = Node::new_raw(NodeKind::Comment, NodeSpecific::Comment(CharacterDataPayload::new(value)));
    node.set_owner_document(Some(document));
    node
}

/// Builds a detached `CDATASection` node owned by `document`.
#[must_use]
pub fn new_cdata_section(document: &Node, value: &str) -> Node {
    let node = Node::new_raw(
        NodeKind::CDataSection,
        NodeSpecific::CDataSection(CharacterDataPayload::new(value)),
    );
    node.set_owner_document(Some(document));
    node
}

/// Builds a detached `ProcessingInstruction` node owned by `document`.
pub fn new_processing_instruction(document: &Node, target: &str, data: &str) -> Node {
    let node = Node::new_raw(
        NodeKind::ProcessingInstruction,
        NodeSpecific::ProcessingInstruction {
            target: target.to_string(),
            data: CharacterDataPayload::new(data),
        },
    );
    node.set_owner_document(Some(document));
    node
}

/// [§ 4.5 `Text.split(offset)`](../index.html): truncates `node`'s data
/// at `offset`, creates a sibling `Text` holding the suffix, and — if
/// `node` currently has a parent — inserts the new sibling immediately
/// after it.
///
/// # Errors
/// Returns [`DomError::IndexSizeError`] if `offset` exceeds the node's
/// length, or if `node` is not a `Text` node.
pub fn split_text(node: &Node, offset: u32) -> Result<Node, DomError> {
    let document = node.owner_document().unwrap_or_else(|| node.clone());
    let suffix = node.with_specific_mut(|specific| {
        let NodeSpecific::Text(payload) = specific else {
            return Err(DomError::IndexSizeError);
        };
        let suffix = payload.substring_data(offset, payload.length_utf16())?;
        let prefix = payload.substring_data(0, offset)?;
        payload.set_data(&prefix);
        Ok(suffix)
    })?;
    let new_node = new_text(&document, &suffix);
    if let Some(parent) = node.parent() {
        crate::mutation::pre_insert(&new_node, &parent, node.next_sibling().as_ref())?;
    }
    Ok(new_node)
}

/// [§ 4.5 `Text.whole_text`](../index.html): the concatenated data of
/// the contiguous run of `Text` siblings (in both directions) that
/// includes `node`.
///
/// # Panics
/// Panics if `node` is not a `Text` node.
#[must_use]
pub fn whole_text(node: &Node) -> String {
    assert!(node.kind() == NodeKind::Text, "whole_text called on a non-Text node");
    let mut run: Vec<Node> = vec![node.clone()];
    let mut cursor = node.previous_sibling();
    while let Some(sibling) = cursor.filter(|s| s.kind() == NodeKind::Text) {
        cursor = sibling.previous_sibling();
        run.insert(0, sibling);
    }
    let mut cursor = node.next_sibling();
    while let Some(sibling) = cursor.filter(|s| s.kind() == NodeKind::Text) {
        cursor = sibling.next_sibling();
        run.push(sibling);
    }
    run.iter()
        .map(|n| {
            n.with_specific(|specific| match specific {
                NodeSpecific::Text(payload) => payload.data().to_string(),
                _ => String::new(),
            })
        })
        .collect()
}
