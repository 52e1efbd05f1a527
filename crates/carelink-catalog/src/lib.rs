//! Program catalog for Carelink.
//!
//! Owns the `programs` collection: creation with a store-enforced unique
//! name, lifecycle fields (start/end dates, active flag), partial updates,
//! and explicit deletes.

pub mod catalog;
pub mod error;

pub use catalog::{NewProgram, ProgramCatalog, ProgramPatch};
pub use error::{CatalogError, CatalogResult};
