//! CSS Selectors Level 4 (subset) matching engine. [§ 4.12](../index.html).
//!
//! This crate ships exactly one selector engine. `tokenizer`/`parser`
//! implement the full grammar this engine needs, including the
//! `An+B` micro-grammar in full rather than special-casing `odd`/`even`/
//! plain integers only (see [`nth`]).

#[cfg(feature = "bloom-filter")]
pub mod bloom;
pub mod nth;
pub mod parser;
mod tokenizer;

use crate::error::DomError;
use crate::node::{Node, NodeKind, NodeSpecific};
use parser::{AttrOp, Combinator, CompoundSelector, PseudoClass, SelectorList, SimpleSelector};

/// Parses and immediately matches `selector_text` against `node`.
/// Equivalent to `element.matches(selectorText)`.
pub fn matches(node: &Node, selector_text: &str) -> Result<bool, DomError> {
    let list = parser::parse(selector_text)?;
    Ok(matches_list(node, &list))
}

/// Whether `node` matches any complex selector in `list`.
#[must_use]
pub fn matches_list(node: &Node, list: &SelectorList) -> bool {
    node.kind() == NodeKind::Element && list.0.iter().any(|complex| matches_complex(node, complex))
}

fn matches_complex(node: &Node, complex: &parser::ComplexSelector) -> bool {
    if !matches_compound(node, &complex.head) {
        return false;
    }
    let mut candidates = vec![node.clone()];
    for (combinator, compound) in &complex.rest {
        let mut next_candidates = Vec::new();
        for candidate in &candidates {
            collect_combinator_matches(candidate, *combinator, compound, &mut next_candidates);
        }
        if next_candidates.is_empty() {
            return false;
        }
        candidates = next_candidates;
    }
    true
}

fn collect_combinator_matches(
    from: &Node,
    combinator: Combinator,
    compound: &CompoundSelector,
    out: &mut Vec<Node>,
) {
    match combinator {
        Combinator::Child => {
            if let Some(parent) = from.parent() {
                if matches_compound(&parent, compound) {
                    out.push(parent);
                }
            }
        }
        Combinator::Descendant => {
            let mut cursor = from.parent();
            while let Some(ancestor) = cursor {
                if matches_compound(&ancestor, compound) {
                    out.push(ancestor.clone());
                }
                cursor = ancestor.parent();
            }
        }
        Combinator::NextSibling => {
            if let Some(prev) = previous_element_sibling(from) {
                if matches_compound(&prev, compound) {
                    out.push(prev);
                }
            }
        }
        Combinator::SubsequentSibling => {
            let mut cursor = previous_element_sibling(from);
            while let Some(sibling) = cursor {
                if matches_compound(&sibling, compound) {
                    out.push(sibling.clone());
                }
                cursor = previous_element_sibling(&sibling);
            }
        }
    }
}

fn matches_compound(node: &Node, compound: &CompoundSelector) -> bool {
    if node.kind() != NodeKind::Element {
        return false;
    }
    compound.simple.iter().all(|simple| matches_simple(node, simple))
}

fn matches_simple(node: &Node, simple: &SimpleSelector) -> bool {
    node.with_specific(|specific| {
        let NodeSpecific::Element(element) = specific else { return false };
        match simple {
            SimpleSelector::Universal => true,
            SimpleSelector::Type(name) => element.local_name().eq_ignore_ascii_case(name),
            SimpleSelector::Id(id) => element.id() == Some(id.as_str()),
            SimpleSelector::Class(class) => {
                element.class_list().iter().any(|c| &**c == class.as_str())
            }
            SimpleSelector::Attribute(attr) => matches_attribute(element, attr),
            SimpleSelector::PseudoClass(pseudo) => matches_pseudo_class(node, pseudo),
        }
    })
}

fn matches_attribute(element: &crate::node::ElementData, attr: &parser::AttrSelector) -> bool {
    let Some(value) = element.get_attribute(&attr.name) else { return false };
    let Some(op) = attr.op else { return true };
    let Some(expected) = &attr.value else { return true };
    let (value, expected) = if attr.case_insensitive {
        (value.to_ascii_lowercase(), expected.to_ascii_lowercase())
    } else {
        (value.to_string(), expected.clone())
    };
    match op {
        AttrOp::Equals => value == expected,
        AttrOp::Includes => value.split_ascii_whitespace().any(|tok| tok == expected),
        AttrOp::DashMatch => value == expected || value.starts_with(&format!("{expected}-")),
        AttrOp::Prefix => value.starts_with(&expected),
        AttrOp::Suffix => value.ends_with(&expected),
        AttrOp::Substring => value.contains(&expected),
    }
}

fn matches_pseudo_class(node: &Node, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::Not(list) => !matches_list(node, list),
        PseudoClass::NthChild(an_b) => an_b.matches(element_index(node, false, false)),
        PseudoClass::NthLastChild(an_b) => an_b.matches(element_index(node, true, false)),
        PseudoClass::NthOfType(an_b) => an_b.matches(element_index(node, false, true)),
        PseudoClass::NthLastOfType(an_b) => an_b.matches(element_index(node, true, true)),
        PseudoClass::FirstChild => previous_element_sibling(node).is_none(),
        PseudoClass::LastChild => next_element_sibling(node).is_none(),
        PseudoClass::OnlyChild => {
            previous_element_sibling(node).is_none() && next_element_sibling(node).is_none()
        }
        PseudoClass::FirstOfType => element_index(node, false, true) == 1,
        PseudoClass::LastOfType => element_index(node, true, true) == 1,
        PseudoClass::OnlyOfType => {
            element_index(node, false, true) == 1 && element_index(node, true, true) == 1
        }
        PseudoClass::Empty => node.first_child().is_none(),
        PseudoClass::Root => node.parent().is_none(),
    }
}

fn previous_element_sibling(node: &Node) -> Option<Node> {
    let mut cursor = node.previous_sibling();
    while let Some(sibling) = cursor {
        if sibling.kind() == NodeKind::Element {
            return Some(sibling);
        }
        cursor = sibling.previous_sibling();
    }
    None
}

fn next_element_sibling(node: &Node) -> Option<Node> {
    let mut cursor = node.next_sibling();
    while let Some(sibling) = cursor {
        if sibling.kind() == NodeKind::Element {
            return Some(sibling);
        }
        cursor = sibling.next_sibling();
    }
    None
}

/// 1-based position of `node` among its element siblings, counting from
/// the end (`from_end`) and optionally restricted to siblings that share
/// its tag name (`same_type`, for the `-of-type` family).
fn element_index(node: &Node, from_end: bool, same_type: bool) -> i32 {
    let tag = node.with_specific(|specific| match specific {
        NodeSpecific::Element(e) => Some(e.local_name().to_string()),
        _ => None,
    });
    let Some(parent) = node.parent() else { return 1 };
    let siblings: Vec<Node> = parent.children().filter(|c| c.kind() == NodeKind::Element).collect();
    let siblings: Vec<Node> = if same_type {
        siblings
            .into_iter()
            .filter(|s| {
                s.with_specific(|specific| match specific {
                    NodeSpecific::Element(e) => Some(e.local_name().to_string()) == tag,
                    _ => false,
                })
            })
            .collect()
    } else {
        siblings
    };
    let position = siblings.iter().position(|s| s == node).unwrap_or(0);
    if from_end {
        (siblings.len() - position) as i32
    } else {
        (position + 1) as i32
    }
}

/// [§ 6.1 `Element::closest(selectors)`](../index.html): the nearest
/// inclusive ancestor of `node` (`node` itself, then its ancestors in
/// order) matching `selector_text`.
pub fn closest(node: &Node, selector_text: &str) -> Result<Option<Node>, DomError> {
    let list = parser::parse(selector_text)?;
    let mut cursor = Some(node.clone());
    while let Some(candidate) = cursor {
        if matches_list(&candidate, &list) {
            return Ok(Some(candidate));
        }
        cursor = candidate.parent();
    }
    Ok(None)
}

/// [§ 4.12 `query_selector`](../index.html): the first descendant of
/// `root` (exclusive) matching `selector_text`, in tree order.
pub fn query_selector(root: &Node, selector_text: &str) -> Result<Option<Node>, DomError> {
    let list = parser::parse(selector_text)?;
    Ok(crate::tree::pre_order(root).skip(1).find(|n| matches_list(n, &list)))
}

/// [§ 4.12 `query_selector_all`](../index.html): every descendant of
/// `root` (exclusive) matching `selector_text`, in tree order. Returns a
/// static snapshot (§4.10: unlike `ChildNodeList`/`HTMLCollection`, the
/// DOM's own `query_selector_all` is explicitly non-live).
pub fn query_selector_all(root: &Node, selector_text: &str) -> Result<Vec<Node>, DomError> {
    let list = parser::parse(selector_text)?;
    Ok(crate::tree::pre_order(root).skip(1).filter(|n| matches_list(n, &list)).collect())
}
