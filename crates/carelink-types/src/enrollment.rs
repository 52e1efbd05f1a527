use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{Document, UniqueKey};
use crate::error::TypeError;
use crate::id::RecordId;

/// Enrollment status label.
///
/// Transitions are free-form: the ledger records whatever status a caller
/// sets, it does not enforce a workflow graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[default]
    Active,
    Completed,
    Suspended,
}

impl FromStr for EnrollmentStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            "Suspended" => Ok(Self::Suspended),
            _ => Err(TypeError::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
            Self::Suspended => write!(f, "Suspended"),
        }
    }
}

/// The relationship record linking one client to one program.
///
/// Holds non-owning references: deleting a client or program never touches
/// its enrollments, and the stored record carries only the raw ids — the
/// display projections are assembled at read time by the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub client: RecordId,
    pub program: RecordId,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Enrollment {
    const COLLECTION: &'static str = "enrollments";

    fn id(&self) -> RecordId {
        self.id
    }

    // Compound unique index: a client may hold at most one enrollment per
    // program, ever.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "client_program",
            format!("{}:{}", self.client, self.program),
        )]
    }
}
