//! `DocumentType` payload (§4.1, the `<!DOCTYPE ...>` node).

/// The kind-specific state of a `DocumentType` node.
#[derive(Clone)]
pub struct DocumentTypeData {
    /// The doctype name, e.g. `html`.
    pub name: String,
    /// The public identifier, or an empty string if absent.
    pub public_id: String,
    /// The system identifier, or an empty string if absent.
    pub system_id: String,
}
