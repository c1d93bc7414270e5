//! `Attr` payload: a namespaced name/value pair, optionally reified as its
//! own node (§4.3, `Document::create_attribute_ns`).

use crate::node::WeakNode;
use crate::string_pool::Atom;

/// The kind-specific state of an `Attr` node.
///
/// Attribute nodes are normally owned inline by an [`super::ElementData`]'s
/// attribute list; a standalone `AttrData`-bearing [`super::Node`] exists
/// only when a caller explicitly reifies one via `create_attribute_ns`,
/// mirroring the WHATWG model where `Attr` is a `Node` subclass but spends
/// most of its life embedded rather than free-standing.
#[derive(Clone)]
pub struct AttrData {
    /// The attribute's namespace, if namespaced.
    pub namespace: Option<Atom>,
    /// The namespace prefix, if any (e.g. `xlink` in `xlink:href`).
    pub prefix: Option<Atom>,
    /// The local (unprefixed) name.
    pub local_name: Atom,
    /// The attribute's string value. DOM attribute values are always
    /// strings (§3.2).
    pub value: String,
    /// The element that currently owns this attribute, if attached to
    /// one. An `Attr` can be owned by at most one element at a time
    /// (§4.3 `InUseAttributeError`).
    pub owner_element: Option<WeakNode>,
}

impl AttrData {
    /// The attribute's qualified name (`prefix:local_name`, or just
    /// `local_name` when there is no prefix).
    #[must_use]
    pub fn name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.to_string(),
        }
    }
}
