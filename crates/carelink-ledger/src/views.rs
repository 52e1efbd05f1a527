//! Read-time join projections.
//!
//! Stored enrollments hold raw reference ids; the ledger widens them with
//! display fields fetched at query time. Rows whose referenced records
//! have since been deleted are filtered out of the projections — orphaned
//! enrollments stay in the store but are invisible to joined reads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use carelink_types::{Client, Enrollment, EnrollmentStatus, Program, RecordId};

/// Client display fields carried by the general enrollment listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Client> for ClientSummary {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
        }
    }
}

/// Program display fields carried by the general enrollment listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSummary {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
}

impl From<&Program> for ProgramSummary {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id,
            name: program.name.clone(),
        }
    }
}

/// Program display fields carried by the per-client listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDetail {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub category: String,
}

impl From<&Program> for ProgramDetail {
    fn from(program: &Program) -> Self {
        Self {
            id: program.id,
            name: program.name.clone(),
            description: program.description.clone(),
            category: program.category.clone(),
        }
    }
}

/// An enrollment joined with both referenced records.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentView {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub client: ClientSummary,
    pub program: ProgramSummary,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EnrollmentView {
    pub fn new(enrollment: &Enrollment, client: &Client, program: &Program) -> Self {
        Self {
            id: enrollment.id,
            client: client.into(),
            program: program.into(),
            enrollment_date: enrollment.enrollment_date,
            status: enrollment.status,
            notes: enrollment.notes.clone(),
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
        }
    }
}

/// An enrollment as listed for one client: the client stays a raw id, the
/// program is widened to its catalog details.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEnrollmentView {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub client: RecordId,
    pub program: ProgramDetail,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientEnrollmentView {
    pub fn new(enrollment: &Enrollment, program: &Program) -> Self {
        Self {
            id: enrollment.id,
            client: enrollment.client,
            program: program.into(),
            enrollment_date: enrollment.enrollment_date,
            status: enrollment.status,
            notes: enrollment.notes.clone(),
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
        }
    }
}
