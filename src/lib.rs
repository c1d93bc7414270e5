//! A WHATWG-DOM-conformant in-memory node tree: mutation, events,
//! `AbortController`, CSS selector matching, and `NodeIterator`/
//! `TreeWalker` traversal, with no parser, no layout, and no scripting
//! glue attached (see `SPEC_FULL.md` for the exact boundary).
//!
//! # Layout
//!
//! - [`node`] — the node base (§4.1), kind-specific payloads, and the
//!   `Document` factory operations that build them.
//! - [`tree`] — tree-order relationships (`contains`,
//!   `compare_document_position`, pre-order walks).
//! - [`validation`] — hierarchy and namespace validation shared by every
//!   mutating entry point.
//! - [`mutation`] — the insert/remove/replace/adopt engine.
//! - [`mixins`] — `ChildNode`/`ParentNode` convenience operations built
//!   on top of [`mutation`].
//! - [`collections`] — `NodeList`/`HTMLCollection`, the two collection
//!   shapes query and traversal operations return.
//! - [`observer`] — mutation-record production for `MutationObserver`.
//! - [`event`] — `EventTarget`/`Event` dispatch (capture/target/bubble).
//! - [`abort`] — `AbortController`/`AbortSignal`.
//! - [`selector`] — a CSS4 selector tokenizer/parser/matcher.
//! - [`traversal`] — `NodeIterator`/`TreeWalker`.
//! - [`error`] — the closed `DomError` taxonomy every fallible operation
//!   returns.
//! - [`string_pool`] — per-document atom interning.

pub mod abort;
pub mod collections;
pub mod error;
pub mod event;
pub mod mixins;
pub mod mutation;
pub mod node;
pub mod observer;
mod rare_data;
pub mod selector;
pub mod string_pool;
pub mod traversal;
pub mod tree;
pub mod validation;

pub use abort::{AbortController, AbortSignal};
pub use error::DomError;
pub use event::{Event, EventInit, EventPhase, EventTarget};
pub use node::{new_document, Node, NodeKind};
pub use observer::{MutationRecord, MutationRecordKind, ObserverInit};
pub use traversal::{NodeFilter, NodeFilterResult, NodeIterator, TreeWalker, WhatToShow};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{create_element, create_text_node};

    #[test]
    fn builds_a_small_tree_and_reads_it_back() {
        let document = new_document("about:blank", "text/html");
        let html = create_element(&document, "html").unwrap();
        let body = create_element(&document, "body").unwrap();
        let text = create_text_node(&document, "hello");

        mutation::append(&document, &html).unwrap();
        mutation::append(&html, &body).unwrap();
        mutation::append(&body, &text).unwrap();

        assert_eq!(node::document_element(&document), Some(html.clone()));
        assert_eq!(node::body(&document), Some(body.clone()));
        assert_eq!(body.child_count(), 1);
        assert!(tree::contains(&document, &text));
        assert_eq!(text.text_content(), "hello");
    }

    #[test]
    fn rejects_a_second_document_element() {
        let document = new_document("about:blank", "text/html");
        let first = create_element(&document, "html").unwrap();
        let second = create_element(&document, "html").unwrap();
        mutation::append(&document, &first).unwrap();
        let err = mutation::append(&document, &second).unwrap_err();
        assert_eq!(err, DomError::HierarchyRequestError);
    }
}
