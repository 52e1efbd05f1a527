//! Enrollment ledger for Carelink.
//!
//! This crate is the integrity core of the system. It owns the
//! `enrollments` collection and the rules that keep it coherent:
//! - both referenced records must exist before an enrollment is created,
//!   checked in a fixed order so callers get predictable errors;
//! - a client holds at most one enrollment per program, ever, enforced by
//!   the store's compound unique index (the ledger's own pre-check only
//!   improves the error message);
//! - reads are joined projections assembled at query time — the stored
//!   record never carries denormalized client or program fields;
//! - deletes never cascade, in either direction.

pub mod error;
pub mod ledger;
pub mod views;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{EnrollmentLedger, EnrollmentPatch, EnrollmentRequest};
pub use views::{ClientEnrollmentView, ClientSummary, EnrollmentView, ProgramDetail, ProgramSummary};
