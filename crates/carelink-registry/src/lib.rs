//! Client registry for Carelink.
//!
//! Owns the `clients` collection: registration with required-field
//! validation, partial updates under the shared overwrite rules, explicit
//! deletes, and free-text search over name and phone number.

pub mod error;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use registry::{ClientPatch, ClientRegistry, NewClient};
