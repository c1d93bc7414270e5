//! `Element` payload: qualified name, attribute list, class list, and the
//! optional ancestor bloom filter used by the selector engine's
//! descendant-combinator fast path (§4.12).

use crate::error::DomError;
use crate::node::{split_qualified_name, Node, NodeSpecific};
use crate::observer::{self, MutationRecordKind};
use crate::string_pool::{Atom, StringPool};

/// One attribute on an element.
///
/// Stored as a flat `Vec` rather than a map: real elements rarely carry
/// more than a handful of attributes, and `Vec` preserves the insertion
/// order `Element::attributes` (a live, ordered `NamedNodeMap`-equivalent)
/// is required to expose.
#[derive(Clone)]
pub struct AttributeRecord {
    /// The attribute's namespace, if namespaced.
    pub namespace: Option<Atom>,
    /// The namespace prefix, if any.
    pub prefix: Option<Atom>,
    /// The local (unprefixed) name.
    pub local_name: Atom,
    /// The string value.
    pub value: String,
}

impl AttributeRecord {
    /// The qualified name (`prefix:local_name`, or just `local_name`).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.to_string(),
        }
    }
}

/// The kind-specific state of an `Element` node.
///
/// [§ 4.12](../index.html): "elements additionally carry a small
/// precomputed ancestor bloom filter... updated incrementally on
/// insert/remove, to let the descendant combinator reject a compound
/// selector in O(1) before falling back to the real ancestor walk."
pub struct ElementData {
    namespace: Option<Atom>,
    prefix: Option<Atom>,
    local_name: Atom,
    tag_name: Atom,
    attributes: Vec<AttributeRecord>,
    /// Precomputed from the `class` attribute each time it changes, so
    /// `:class` selector matching and `classList` don't re-split the
    /// attribute string on every query.
    class_list: Vec<Atom>,
    /// Bloom filter over this element's own ancestor chain's tag-name
    /// hashes. Feature-gated: `bloom-filter` builds keep it maintained,
    /// others always report "maybe present" (i.e. defer to the real walk).
    #[cfg(feature = "bloom-filter")]
    ancestor_bloom: u64,
}

impl ElementData {
    /// Builds a fresh, detached element payload. `qualified_name` is
    /// parsed per [`split_qualified_name`]; namespace interning is the
    /// caller's responsibility (`Document::create_element_ns`).
    pub(crate) fn new(
        pool: &StringPool,
        namespace: Option<&str>,
        qualified_name: &str,
    ) -> Result<Self, DomError> {
        let (prefix, local) = split_qualified_name(qualified_name)?;
        let local_name = pool.intern(&local);
        let prefix = prefix.map(|p| pool.intern(&p));
        let tag_name = pool.intern(qualified_name);
        Ok(Self {
            namespace: namespace.map(|ns| pool.intern(ns)),
            prefix,
            local_name,
            tag_name,
            attributes: Vec::new(),
            class_list: Vec::new(),
            #[cfg(feature = "bloom-filter")]
            ancestor_bloom: 0,
        })
    }

    /// The element's namespace URI, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The local (unprefixed) name, e.g. `div`.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// The qualified name as it was spelled at creation, e.g. `svg:rect`.
    #[must_use]
    pub fn tag_name(&self) -> &Atom {
        &self.tag_name
    }

    /// All attributes, in insertion order. Backs the live `attributes`
    /// collection (§4.10).
    #[must_use]
    pub fn attributes(&self) -> &[AttributeRecord] {
        &self.attributes
    }

    /// [§ 4.3 `get_attribute`](../index.html)
    #[must_use]
    pub fn get_attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| &*a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// [§ 4.3 `get_attribute_ns`](../index.html)
    #[must_use]
    pub fn get_attribute_ns(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == namespace && &*a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// [§ 4.3 `has_attribute`](../index.html)
    #[must_use]
    pub fn has_attribute(&self, local_name: &str) -> bool {
        self.attributes.iter().any(|a| &*a.local_name == local_name)
    }

    /// [§ 4.3 `set_attribute(name, value)`](../index.html): unnamespaced
    /// set-or-create, with the attribute list's insertion order preserved
    /// on update (the existing record's value is replaced in place).
    pub fn set_attribute(&mut self, pool: &StringPool, local_name: &str, value: &str) {
        if let Some(existing) = self.attributes.iter_mut().find(|a| &*a.local_name == local_name) {
            existing.value = value.to_string();
        } else {
            self.attributes.push(AttributeRecord {
                namespace: None,
                prefix: None,
                local_name: pool.intern(local_name),
                value: value.to_string(),
            });
        }
        if local_name == "class" {
            self.reindex_class_list(value);
        }
    }

    /// [§ 4.3 `set_attribute_ns`](../index.html)
    pub fn set_attribute_ns(
        &mut self,
        pool: &StringPool,
        namespace: Option<&str>,
        qualified_name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let (prefix, local) = split_qualified_name(qualified_name)?;
        crate::validation::validate_namespace(namespace, prefix.as_deref(), &local)?;
        let local_name = pool.intern(&local);
        if let Some(existing) = self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.as_deref() == namespace && a.local_name == local_name)
        {
            existing.value = value.to_string();
        } else {
            self.attributes.push(AttributeRecord {
                namespace: namespace.map(|ns| pool.intern(ns)),
                prefix: prefix.map(|p| pool.intern(&p)),
                local_name,
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// [§ 4.3 `remove_attribute`](../index.html)
    pub fn remove_attribute(&mut self, local_name: &str) {
        self.attributes.retain(|a| &*a.local_name != local_name);
        if local_name == "class" {
            self.class_list.clear();
        }
    }

    /// [§ 6.1 `toggle_attribute(name, force)`](../index.html): with no
    /// `force`, flips presence; with `force`, sets presence to that value
    /// unconditionally. Returns whether the attribute is present afterward.
    #[must_use]
    pub fn toggle_attribute(&mut self, pool: &StringPool, local_name: &str, force: Option<bool>) -> bool {
        let present = self.has_attribute(local_name);
        let should_be_present = force.unwrap_or(!present);
        match (should_be_present, present) {
            (true, false) => self.set_attribute(pool, local_name, ""),
            (false, true) => self.remove_attribute(local_name),
            _ => {}
        }
        should_be_present
    }

    /// The element's `id` attribute value, if set and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id").filter(|s| !s.is_empty())
    }

    /// The parsed `class` attribute as a list of tokens, used by `:class`
    /// selector matching and `classList`.
    #[must_use]
    pub fn class_list(&self) -> &[Atom] {
        &self.class_list
    }

    fn reindex_class_list(&mut self, value: &str) {
        self.class_list = value.split_ascii_whitespace().map(Atom::from).collect();
    }

    /// [§ 4.12](../index.html) Whether this element's ancestor bloom
    /// filter might contain `tag_hash`. A `false` return is a hard
    /// guarantee of absence; `true` requires confirming with the real
    /// ancestor walk.
    #[cfg(feature = "bloom-filter")]
    #[must_use]
    pub fn ancestor_bloom_may_contain(&self, tag_hash: u64) -> bool {
        let bit = 1u64 << (tag_hash % 64);
        self.ancestor_bloom & bit != 0
    }

    #[cfg(feature = "bloom-filter")]
    pub(crate) fn ancestor_bloom_insert(&mut self, tag_hash: u64) {
        self.ancestor_bloom |= 1u64 << (tag_hash % 64);
    }

    #[cfg(feature = "bloom-filter")]
    pub(crate) fn ancestor_bloom_union(&mut self, other: u64) {
        self.ancestor_bloom |= other;
    }

    #[cfg(feature = "bloom-filter")]
    pub(crate) fn ancestor_bloom_bits(&self) -> u64 {
        self.ancestor_bloom
    }

    pub(crate) fn shallow_clone(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            prefix: self.prefix.clone(),
            local_name: Atom::clone(&self.local_name),
            tag_name: Atom::clone(&self.tag_name),
            attributes: self.attributes.clone(),
            class_list: self.class_list.clone(),
            #[cfg(feature = "bloom-filter")]
            ancestor_bloom: 0,
        }
    }

    pub(crate) fn equal_payload(&self, other: &Self) -> bool {
        if self.namespace != other.namespace || self.local_name != other.local_name {
            return false;
        }
        if self.attributes.len() != other.attributes.len() {
            return false;
        }
        self.attributes.iter().all(|a| {
            other.attributes.iter().any(|b| {
                a.namespace == b.namespace && a.local_name == b.local_name && a.value == b.value
            })
        })
    }

    /// [§ 4.6 adopting steps](../index.html): re-interns this element's
    /// tag/attribute-name atoms into `new_document`'s string pool so the
    /// old document's pool can eventually be freed in full.
    pub(crate) fn reintern_names(&mut self, new_document: &Node) {
        use crate::node::intern_in;
        self.local_name = intern_in(new_document, &self.local_name);
        self.tag_name = intern_in(new_document, &self.tag_name);
        self.prefix = self.prefix.as_deref().map(|p| intern_in(new_document, p));
        self.namespace = self.namespace.as_deref().map(|ns| intern_in(new_document, ns));
        for attr in &mut self.attributes {
            attr.local_name = intern_in(new_document, &attr.local_name);
            attr.prefix = attr.prefix.as_deref().map(|p| intern_in(new_document, p));
            attr.namespace = attr.namespace.as_deref().map(|ns| intern_in(new_document, ns));
        }
    }
}

/// [§ 6.1 `Element` operations](../index.html), as free functions over a
/// `&Node` rather than methods on a separate `Element`-only wrapper type —
/// the same shape [`crate::node::split_text`]/[`crate::node::whole_text`]
/// use for `CharacterData`. Each panics if `node` is not an `Element`;
/// every call site in this crate only reaches these after checking
/// `node.kind() == NodeKind::Element` (or holds an `Element` by
/// construction, e.g. straight out of `create_element`).
fn with_element<R>(node: &Node, f: impl FnOnce(&ElementData) -> R) -> R {
    node.with_specific(|specific| match specific {
        NodeSpecific::Element(element) => f(element),
        _ => panic!("called an Element-only operation on a non-Element node"),
    })
}

fn with_element_mut<R>(node: &Node, f: impl FnOnce(&mut ElementData) -> R) -> R {
    node.with_specific_mut(|specific| match specific {
        NodeSpecific::Element(element) => f(element),
        _ => panic!("called an Element-only operation on a non-Element node"),
    })
}

fn with_pool<R>(node: &Node, f: impl FnOnce(&StringPool) -> R) -> R {
    let document = node.owner_document().expect("an Element always has an owner document");
    document.with_specific(|specific| match specific {
        NodeSpecific::Document(data) => f(data.pool()),
        _ => panic!("owner_document is always a Document node"),
    })
}

/// [§ 6.1 `Element::tag_name`](../index.html)
#[must_use]
pub fn tag_name(node: &Node) -> String {
    with_element(node, |e| e.tag_name().to_string())
}

/// [§ 6.1 `Element::id`](../index.html)
#[must_use]
pub fn id(node: &Node) -> Option<String> {
    with_element(node, |e| e.id().map(str::to_string))
}

/// [§ 6.1 `Element::class_list`](../index.html)
#[must_use]
pub fn class_list(node: &Node) -> Vec<String> {
    with_element(node, |e| e.class_list().iter().map(|c| c.to_string()).collect())
}

/// [§ 6.1 `Element::get_attribute`](../index.html)
#[must_use]
pub fn get_attribute(node: &Node, local_name: &str) -> Option<String> {
    with_element(node, |e| e.get_attribute(local_name).map(str::to_string))
}

/// [§ 6.1 `Element::get_attribute_ns`](../index.html)
#[must_use]
pub fn get_attribute_ns(node: &Node, namespace: Option<&str>, local_name: &str) -> Option<String> {
    with_element(node, |e| e.get_attribute_ns(namespace, local_name).map(str::to_string))
}

/// [§ 6.1 `Element::has_attribute`](../index.html)
#[must_use]
pub fn has_attribute(node: &Node, local_name: &str) -> bool {
    with_element(node, |e| e.has_attribute(local_name))
}

/// [§ 6.1 `Element::set_attribute`](../index.html). [§ 4.13](../index.html):
/// always queues an `Attributes` mutation record, even when `value` equals
/// the attribute's current value — "set an attribute" unconditionally
/// queues, unlike `toggle_attribute`, which only does so on an actual
/// presence change.
pub fn set_attribute(node: &Node, local_name: &str, value: &str) {
    let old_value = get_attribute(node, local_name);
    with_pool(node, |pool| with_element_mut(node, |e| e.set_attribute(pool, local_name, value)));
    observer::record_mutation(
        node,
        MutationRecordKind::Attributes { local_name: local_name.to_string(), old_value },
    );
}

/// [§ 6.1 `Element::set_attribute_ns`](../index.html)
pub fn set_attribute_ns(
    node: &Node,
    namespace: Option<&str>,
    qualified_name: &str,
    value: &str,
) -> Result<(), DomError> {
    let (_, local_name) = split_qualified_name(qualified_name)?;
    let old_value = get_attribute_ns(node, namespace, &local_name);
    with_pool(node, |pool| with_element_mut(node, |e| e.set_attribute_ns(pool, namespace, qualified_name, value)))?;
    observer::record_mutation(node, MutationRecordKind::Attributes { local_name, old_value });
    Ok(())
}

/// [§ 6.1 `Element::remove_attribute`](../index.html). No record is
/// queued when the attribute was already absent — removal of a
/// nonexistent attribute is a no-op per §4.3.
pub fn remove_attribute(node: &Node, local_name: &str) {
    let Some(old_value) = get_attribute(node, local_name) else { return };
    with_element_mut(node, |e| e.remove_attribute(local_name));
    observer::record_mutation(
        node,
        MutationRecordKind::Attributes { local_name: local_name.to_string(), old_value: Some(old_value) },
    );
}

/// [§ 6.1 `Element::toggle_attribute`](../index.html). A record is only
/// queued when presence actually changed, matching `remove_attribute`'s
/// no-op-on-no-change contract rather than `set_attribute`'s
/// unconditional one.
#[must_use]
pub fn toggle_attribute(node: &Node, local_name: &str, force: Option<bool>) -> bool {
    let old_value = get_attribute(node, local_name);
    let result = with_pool(node, |pool| with_element_mut(node, |e| e.toggle_attribute(pool, local_name, force)));
    let new_value = get_attribute(node, local_name);
    if old_value != new_value {
        observer::record_mutation(
            node,
            MutationRecordKind::Attributes { local_name: local_name.to_string(), old_value },
        );
    }
    result
}

/// [§ 6.1 `Element::matches(selectors)`](../index.html)
pub fn matches(node: &Node, selector_text: &str) -> Result<bool, DomError> {
    crate::selector::matches(node, selector_text)
}

/// [§ 6.1 `Element::closest(selectors)`](../index.html): the nearest
/// inclusive ancestor of `node` matching `selectors`, or `None`.
pub fn closest(node: &Node, selector_text: &str) -> Result<Option<Node>, DomError> {
    crate::selector::closest(node, selector_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{create_element, new_document};

    #[test]
    fn toggle_attribute_flips_presence_by_default() {
        let document = new_document("about:blank", "text/html");
        let div = create_element(&document, "div").unwrap();
        assert!(!has_attribute(&div, "hidden"));
        assert!(toggle_attribute(&div, "hidden", None));
        assert!(has_attribute(&div, "hidden"));
        assert!(!toggle_attribute(&div, "hidden", None));
        assert!(!has_attribute(&div, "hidden"));
    }

    #[test]
    fn toggle_attribute_honors_force() {
        let document = new_document("about:blank", "text/html");
        let div = create_element(&document, "div").unwrap();
        assert!(toggle_attribute(&div, "disabled", Some(true)));
        assert!(toggle_attribute(&div, "disabled", Some(true)));
        assert!(has_attribute(&div, "disabled"));
        assert!(!toggle_attribute(&div, "disabled", Some(false)));
        assert!(!has_attribute(&div, "disabled"));
    }

    #[test]
    fn set_attribute_updates_existing_value_in_place() {
        let document = new_document("about:blank", "text/html");
        let div = create_element(&document, "div").unwrap();
        set_attribute(&div, "data-x", "1");
        set_attribute(&div, "data-x", "2");
        assert_eq!(get_attribute(&div, "data-x").as_deref(), Some("2"));
    }

    #[test]
    fn closest_walks_inclusive_ancestors() {
        let document = new_document("about:blank", "text/html");
        let parent = create_element(&document, "section").unwrap();
        set_attribute(&parent, "id", "outer");
        let child = create_element(&document, "span").unwrap();
        crate::mutation::append(&parent, &child).unwrap();
        let found = closest(&child, "#outer").unwrap();
        assert_eq!(found, Some(parent));
    }
}
