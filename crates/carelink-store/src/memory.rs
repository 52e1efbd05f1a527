use std::sync::RwLock;

use carelink_types::{Document, RecordId};

use crate::error::{StoreError, StoreResult};
use crate::traits::Collection;

/// In-memory, `RwLock`-backed collection.
///
/// Intended for tests, demos, and embedding. Records are held in insertion
/// order and cloned on read/write. Unique-index checks run under the same
/// write lock as the mutation, so the index holds even under concurrent
/// writers.
pub struct MemoryCollection<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Document> MemoryCollection<T> {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Returns `true` if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.records.write().expect("lock poisoned").clear();
    }

    /// Check `doc`'s unique keys against every record except the one at
    /// `skip` (the record being replaced, if any).
    fn check_unique(records: &[T], doc: &T, skip: Option<usize>) -> StoreResult<()> {
        for key in doc.unique_keys() {
            let taken = records.iter().enumerate().any(|(i, existing)| {
                Some(i) != skip
                    && existing
                        .unique_keys()
                        .iter()
                        .any(|k| k.index == key.index && k.key == key.key)
            });
            if taken {
                return Err(StoreError::UniqueViolation {
                    collection: T::COLLECTION,
                    index: key.index,
                });
            }
        }
        Ok(())
    }
}

impl<T: Document> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> Collection<T> for MemoryCollection<T> {
    fn insert(&self, doc: T) -> StoreResult<T> {
        let mut records = self.records.write().expect("lock poisoned");
        if records.iter().any(|r| r.id() == doc.id()) {
            return Err(StoreError::DuplicateId {
                collection: T::COLLECTION,
                id: doc.id(),
            });
        }
        Self::check_unique(&records, &doc, None)?;
        records.push(doc.clone());
        tracing::debug!(collection = T::COLLECTION, id = %doc.id(), "inserted record");
        Ok(doc)
    }

    fn find_all(&self) -> StoreResult<Vec<T>> {
        Ok(self.records.read().expect("lock poisoned").clone())
    }

    fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.iter().find(|r| r.id() == *id).cloned())
    }

    fn find_where(&self, filter: &dyn Fn(&T) -> bool) -> StoreResult<Vec<T>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records.iter().filter(|r| filter(r)).cloned().collect())
    }

    fn find_text(&self, query: &str) -> StoreResult<Vec<T>> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if terms.is_empty() {
            return self.find_all();
        }
        let records = self.records.read().expect("lock poisoned");
        Ok(records
            .iter()
            .filter(|r| {
                r.text_values().iter().any(|value| {
                    let value = value.to_lowercase();
                    terms.iter().any(|term| value.contains(term))
                })
            })
            .cloned()
            .collect())
    }

    fn replace(&self, doc: T) -> StoreResult<Option<T>> {
        let mut records = self.records.write().expect("lock poisoned");
        let Some(position) = records.iter().position(|r| r.id() == doc.id()) else {
            return Ok(None);
        };
        Self::check_unique(&records, &doc, Some(position))?;
        records[position] = doc.clone();
        Ok(Some(doc))
    }

    fn delete(&self, id: &RecordId) -> StoreResult<bool> {
        let mut records = self.records.write().expect("lock poisoned");
        let before = records.len();
        records.retain(|r| r.id() != *id);
        Ok(records.len() < before)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().expect("lock poisoned").len())
    }
}

impl<T: Document> std::fmt::Debug for MemoryCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.records.read().expect("lock poisoned").len();
        f.debug_struct("MemoryCollection")
            .field("collection", &T::COLLECTION)
            .field("record_count", &count)
            .finish()
    }
}
