//! DOM error taxonomy.
//!
//! [§ 2.3 Exceptions](https://webidl.spec.whatwg.org/#idl-DOMException)
//!
//! "A DOMException... has an associated name, which is a string." Every
//! fallible operation in this crate returns one of these closed variants
//! instead of throwing; there is no catch-all "other" case. `OutOfMemory`
//! is carried alongside the DOM-proper names so allocation failure is
//! never confused with a spec-defined exception and never silently
//! swallowed (§7 Error Handling Design).

use std::fmt;

/// One DOM error kind per [§ 6.2](https://dom.spec.whatwg.org/#introduction-to-web-idl),
/// plus `OutOfMemory` for allocation failure.
///
/// Every public, fallible mutation in this crate returns `Result<T,
/// DomError>`. No operation partially applies a mutation and then
/// returns an error: validation runs first and the tree is left
/// untouched on failure (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    /// The node cannot be inserted at the specified point because of its
    /// kind, or because doing so would create a cycle.
    #[error("HierarchyRequestError")]
    HierarchyRequestError,
    /// The reference child (or the node to remove/replace) is not a
    /// child of the given parent.
    #[error("NotFoundError")]
    NotFoundError,
    /// A character-data offset exceeds the node's length.
    #[error("IndexSizeError")]
    IndexSizeError,
    /// A qualified name or namespace string fails the XML Name/NCName
    /// production, or violates an xml/xmlns cross-constraint.
    #[error("InvalidCharacterError")]
    InvalidCharacterError,
    /// The operation is not possible given the object's current state
    /// (e.g. re-entrant `dispatch_event`).
    #[error("InvalidStateError")]
    InvalidStateError,
    /// A namespace/prefix combination is invalid per
    /// [`validate_and_extract`](crate::validation::validate_and_extract).
    #[error("NamespaceError")]
    NamespaceError,
    /// An `Attr` already belongs to another element.
    #[error("InUseAttributeError")]
    InUseAttributeError,
    /// An operation was abandoned because its `AbortSignal` fired.
    #[error("AbortError")]
    AbortError,
    /// The operation, while recognized, is not supported on this kind of
    /// object (e.g. `importNode`/`adoptNode` given a `Document`).
    #[error("NotSupportedError")]
    NotSupportedError,
    /// Allocation failed mid-operation; any partial edit has been
    /// unwound before this is returned.
    #[error("OutOfMemory")]
    OutOfMemory,
}

/// The `reason` carried by an aborted [`AbortSignal`](crate::abort::AbortSignal).
///
/// Kept distinct from [`DomError`] because an abort reason is an opaque
/// value supplied by the caller (often not a `DomError` at all).
#[derive(Debug, Clone)]
pub enum AbortReason {
    /// The default reason used when `abort()` is called with none
    /// supplied.
    Default,
    /// A caller-supplied reason, carried as an opaque string since this
    /// crate has no JS-value type to preserve arbitrary payloads.
    Custom(String),
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "signal is aborted without reason"),
            Self::Custom(msg) => write!(f, "{msg}"),
        }
    }
}
