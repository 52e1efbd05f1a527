use crate::id::RecordId;

/// A single unique-index entry for a document.
///
/// `index` names the index (used in store errors and logs), `key` is the
/// document's value under that index. Two documents in one collection may
/// never share a key for the same index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniqueKey {
    pub index: &'static str,
    pub key: String,
}

impl UniqueKey {
    pub fn new(index: &'static str, key: impl Into<String>) -> Self {
        Self {
            index,
            key: key.into(),
        }
    }
}

/// Per-collection schema declarations.
///
/// Each persisted record type declares its collection name, its unique
/// indexes, and the values covered by its text index. The record store
/// enforces these declarations; the record types own them, the way a
/// schema belongs with its model.
pub trait Document: Clone + Send + Sync + 'static {
    /// Collection name, used in store errors and logs.
    const COLLECTION: &'static str;

    /// The record's identifier.
    fn id(&self) -> RecordId;

    /// Keys enforced unique across the collection. Empty by default.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    /// Values searched by the collection's text index. Empty by default.
    fn text_values(&self) -> Vec<&str> {
        Vec::new()
    }
}
