use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{Document, UniqueKey};
use crate::id::RecordId;

/// A health program clients can enroll in.
///
/// Invariant: `name` is unique across all programs, enforced by a unique
/// index in the record store rather than by callers remembering to check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Program {
    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Program {
    const COLLECTION: &'static str = "programs";

    fn id(&self) -> RecordId {
        self.id
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("name", self.name.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_program() -> Program {
        Program {
            id: RecordId::generate(),
            name: "Wellness Workshop".into(),
            description: "A 6-week program focusing on overall wellness".into(),
            category: "Wellness".into(),
            start_date: Utc::now(),
            end_date: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn name_is_the_unique_key() {
        let program = sample_program();
        let keys = program.unique_keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].index, "name");
        assert_eq!(keys[0].key, "Wellness Workshop");
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(sample_program()).unwrap();
        assert_eq!(json["name"], "Wellness Workshop");
        assert!(json["startDate"].is_string());
        assert_eq!(json["active"], true);
        // endDate is omitted entirely when unset.
        assert!(json.get("endDate").is_none());
    }
}
