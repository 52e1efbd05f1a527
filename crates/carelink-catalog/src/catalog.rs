use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use carelink_store::{Collection, StoreError};
use carelink_types::{dates, merge, Program, RecordId};

use crate::error::{CatalogError, CatalogResult};

/// Creation payload. Required fields are validated by the catalog, not the
/// deserializer, so missing values surface as validation failures.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProgram {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "dates::deserialize_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "dates::deserialize_opt")]
    pub end_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

/// Partial-update payload.
///
/// `active` is applied whenever it is present in the request, including an
/// explicit `false`; the text fields only apply when non-empty. The
/// asymmetry is inherited behavior the dashboard depends on.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "dates::deserialize_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "dates::deserialize_opt")]
    pub end_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

/// Program Catalog: owns program records end to end.
pub struct ProgramCatalog {
    programs: Arc<dyn Collection<Program>>,
}

impl ProgramCatalog {
    pub fn new(programs: Arc<dyn Collection<Program>>) -> Self {
        Self { programs }
    }

    /// Create a new program. The store's unique index on the program name
    /// is what actually enforces uniqueness.
    pub fn create(&self, payload: NewProgram) -> CatalogResult<Program> {
        let name = require(payload.name, "Program name is required")?;
        let description = require(payload.description, "Description is required")?;
        let category = require(payload.category, "Category is required")?;

        let now = Utc::now();
        let program = Program {
            id: RecordId::generate(),
            name,
            description,
            category,
            start_date: payload.start_date.unwrap_or(now),
            end_date: payload.end_date,
            active: payload.active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let program = self.programs.insert(program).map_err(duplicate_name)?;
        tracing::info!(program = %program.id, name = %program.name, "created program");
        Ok(program)
    }

    /// All programs, in store insertion order.
    pub fn list(&self) -> CatalogResult<Vec<Program>> {
        Ok(self.programs.find_all()?)
    }

    /// Look up one program.
    pub fn get(&self, id: &RecordId) -> CatalogResult<Program> {
        self.programs.find_by_id(id)?.ok_or(CatalogError::NotFound)
    }

    /// Apply a partial update and return the merged record. Renaming onto
    /// an existing program name is rejected by the unique index.
    pub fn update(&self, id: &RecordId, patch: ProgramPatch) -> CatalogResult<Program> {
        let mut program = self.get(id)?;

        merge::text(&mut program.name, patch.name);
        merge::text(&mut program.description, patch.description);
        merge::text(&mut program.category, patch.category);
        merge::value(&mut program.start_date, patch.start_date);
        merge::opt_value(&mut program.end_date, patch.end_date);
        merge::flag(&mut program.active, patch.active);
        program.touch();

        self.programs
            .replace(program)
            .map_err(duplicate_name)?
            .ok_or(CatalogError::NotFound)
    }

    /// Delete a program. Enrollments referencing the id are left untouched.
    pub fn delete(&self, id: &RecordId) -> CatalogResult<()> {
        if !self.programs.delete(id)? {
            return Err(CatalogError::NotFound);
        }
        tracing::info!(program = %id, "deleted program");
        Ok(())
    }
}

fn require(value: Option<String>, message: &str) -> CatalogResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CatalogError::Validation(message.into())),
    }
}

/// Surface a name-index collision as a client error rather than a store
/// failure.
fn duplicate_name(err: StoreError) -> CatalogError {
    match err {
        StoreError::UniqueViolation { index: "name", .. } => {
            CatalogError::Validation("A program with this name already exists".into())
        }
        other => CatalogError::Store(other),
    }
}
