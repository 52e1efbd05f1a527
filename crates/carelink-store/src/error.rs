use carelink_types::RecordId;

/// Errors from record store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A write would duplicate a value covered by a unique index.
    #[error("unique index violation on {collection}.{index}")]
    UniqueViolation {
        collection: &'static str,
        index: &'static str,
    },

    /// A record with this id already exists in the collection.
    #[error("duplicate id in {collection}: {id}")]
    DuplicateId {
        collection: &'static str,
        id: RecordId,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
