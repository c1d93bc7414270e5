//! Ancestor bloom filter maintenance for the descendant-combinator fast
//! path. [§ 4.12](../index.html), feature-gated by `bloom-filter`.
//!
//! A 64-bit filter per element, one bit per (ancestor tag name hash mod
//! 64). On a descendant-combinator step the matcher can ask "could any
//! ancestor possibly be a `div`?" and get a hard "no" in O(1) before
//! falling back to the real ancestor walk.

use crate::node::{Node, NodeSpecific};

/// FNV-1a: a fast non-cryptographic hasher, chosen because this is a
/// cache-locality optimization, not a security boundary.
#[must_use]
pub fn hash_tag(name: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in name.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01B3);
    }
    hash
}

/// Updates `node`'s own bloom bits (if it is an element) to include its
/// new parent's tag hash and the parent's accumulated ancestor bits, run
/// after every `insert`.
pub fn on_attach(node: &Node, parent: &Node) {
    let parent_bits = parent.with_specific(|specific| match specific {
        NodeSpecific::Element(e) => e.ancestor_bloom_bits() | hash_tag(e.tag_name()),
        _ => 0,
    });
    if parent_bits == 0 {
        return;
    }
    node.with_specific_mut(|specific| {
        if let NodeSpecific::Element(e) = specific {
            e.ancestor_bloom_union(parent_bits);
        }
    });
    for descendant in crate::tree::pre_order(node).skip(1) {
        descendant.with_specific_mut(|specific| {
            if let NodeSpecific::Element(e) = specific {
                e.ancestor_bloom_union(parent_bits);
            }
        });
    }
}

/// A detached subtree keeps its (now stale, superset-only) bits; bloom
/// filters are one-directional approximations (a `false` answer is exact,
/// a `true` answer must still be confirmed by the real ancestor walk), so
/// leaving them set after detach only costs a few wasted confirmations,
/// never a wrong match.
pub fn on_detach(_node: &Node) {}
