use carelink_types::{Document, RecordId};

use crate::error::StoreResult;

/// One collection of persisted records.
///
/// All implementations must satisfy these invariants:
/// - Unique indexes declared by [`Document::unique_keys`] are enforced on
///   every write, atomically with the write itself. Concurrent inserts of
///   conflicting documents see at most one success.
/// - `find_all` returns records in insertion order.
/// - Reads never observe a partially applied write.
/// - Failures are propagated as typed errors, never silently ignored.
pub trait Collection<T: Document>: Send + Sync {
    /// Insert a new record.
    ///
    /// Fails with `UniqueViolation` if any declared unique key collides
    /// with an existing record, and `DuplicateId` on id reuse.
    fn insert(&self, doc: T) -> StoreResult<T>;

    /// All records, in insertion order.
    fn find_all(&self) -> StoreResult<Vec<T>>;

    /// Look up a record by id. Returns `Ok(None)` if absent.
    fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>>;

    /// All records matching a filter, in insertion order.
    fn find_where(&self, filter: &dyn Fn(&T) -> bool) -> StoreResult<Vec<T>>;

    /// Text-index search: records whose declared text values match any
    /// whitespace-separated term of `query`, case-insensitively.
    fn find_text(&self, query: &str) -> StoreResult<Vec<T>>;

    /// Replace the stored record with the same id as `doc`.
    ///
    /// Returns `Ok(None)` if no record has that id. Unique indexes are
    /// re-checked against every other record.
    fn replace(&self, doc: T) -> StoreResult<Option<T>>;

    /// Delete a record by id. Returns `true` if the record existed.
    fn delete(&self, id: &RecordId) -> StoreResult<bool>;

    /// Number of records in the collection.
    fn count(&self) -> StoreResult<usize>;
}
