//! Foundation types for Carelink.
//!
//! This crate provides the record identifiers, domain records, and shared
//! semantics used throughout the Carelink system. Every other Carelink
//! crate depends on `carelink-types`.
//!
//! # Key Types
//!
//! - [`RecordId`] — 12-byte record identifier rendered as 24 hex characters
//! - [`Client`] — a registered patient/person record
//! - [`Program`] — a health program clients can enroll in
//! - [`Enrollment`] — the link between one client and one program
//! - [`Document`] — per-collection schema declarations (unique keys, text index)
//! - [`merge`] — the partial-update overwrite rules shared by all records

pub mod client;
pub mod dates;
pub mod document;
pub mod enrollment;
pub mod error;
pub mod id;
pub mod merge;
pub mod program;

pub use client::{Address, Client, Gender};
pub use document::{Document, UniqueKey};
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use error::TypeError;
pub use id::RecordId;
pub use program::Program;
