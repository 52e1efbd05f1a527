//! Record storage for Carelink.
//!
//! This crate implements the document-store seam the rest of the system
//! reads and writes through. Each record type lives in its own collection;
//! a collection provides create, find-by-id, find-by-filter, text search,
//! replace, and delete, and enforces the unique indexes its documents
//! declare via [`Document`](carelink_types::Document).
//!
//! # Backends
//!
//! All backends implement the [`Collection`] trait:
//!
//! - [`MemoryCollection`] — `RwLock`-backed store for tests, demos, and
//!   embedding
//!
//! # Design Rules
//!
//! 1. Unique indexes are checked and applied under one write lock; the
//!    index is authoritative, application-level pre-checks are advisory.
//! 2. Listing preserves insertion order.
//! 3. The store never interprets document contents beyond the declared
//!    index values.
//! 4. Store failures are propagated as typed errors, never silently
//!    swallowed.

pub mod error;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::MemoryCollection;
pub use traits::Collection;
