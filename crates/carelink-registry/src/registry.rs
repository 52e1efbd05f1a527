use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use carelink_store::Collection;
use carelink_types::{dates, merge, Address, Client, Gender, RecordId};

use crate::error::{RegistryError, RegistryResult};

/// Registration payload. Every field is optional at the wire level so the
/// registry can report missing required fields as validation failures
/// rather than parse failures.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    #[serde(deserialize_with = "dates::deserialize_opt")]
    pub date_of_birth: Option<DateTime<Utc>>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
    pub medical_history: Option<String>,
}

/// Partial-update payload. Omitted and empty fields leave the stored value
/// unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    #[serde(deserialize_with = "dates::deserialize_opt")]
    pub date_of_birth: Option<DateTime<Utc>>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
    pub medical_history: Option<String>,
}

/// Client Registry: owns client records end to end.
pub struct ClientRegistry {
    clients: Arc<dyn Collection<Client>>,
}

impl ClientRegistry {
    pub fn new(clients: Arc<dyn Collection<Client>>) -> Self {
        Self { clients }
    }

    /// Register a new client after validating required fields.
    pub fn register(&self, payload: NewClient) -> RegistryResult<Client> {
        let first_name = require(payload.first_name, "First name is required")?;
        let last_name = require(payload.last_name, "Last name is required")?;
        let gender = parse_gender(require(payload.gender, "Gender is required")?)?;
        let date_of_birth = payload
            .date_of_birth
            .ok_or_else(|| RegistryError::Validation("Date of birth is required".into()))?;
        let phone_number = require(payload.phone_number, "Phone number is required")?;

        let now = Utc::now();
        let client = self.clients.insert(Client {
            id: RecordId::generate(),
            first_name,
            last_name,
            gender,
            date_of_birth,
            phone_number,
            address: payload.address,
            medical_history: payload.medical_history,
            created_at: now,
            updated_at: now,
        })?;

        tracing::info!(client = %client.id, "registered client");
        Ok(client)
    }

    /// All clients, in store insertion order.
    pub fn list(&self) -> RegistryResult<Vec<Client>> {
        Ok(self.clients.find_all()?)
    }

    /// Look up one client.
    pub fn get(&self, id: &RecordId) -> RegistryResult<Client> {
        self.clients.find_by_id(id)?.ok_or(RegistryError::NotFound)
    }

    /// Apply a partial update and return the merged record.
    pub fn update(&self, id: &RecordId, patch: ClientPatch) -> RegistryResult<Client> {
        let mut client = self.get(id)?;

        merge::text(&mut client.first_name, patch.first_name);
        merge::text(&mut client.last_name, patch.last_name);
        if let Some(gender) = patch.gender.filter(|g| !g.is_empty()) {
            client.gender = parse_gender(gender)?;
        }
        merge::value(&mut client.date_of_birth, patch.date_of_birth);
        merge::text(&mut client.phone_number, patch.phone_number);
        merge::opt_value(&mut client.address, patch.address);
        merge::opt_text(&mut client.medical_history, patch.medical_history);
        client.touch();

        self.clients
            .replace(client)?
            .ok_or(RegistryError::NotFound)
    }

    /// Delete a client. Enrollments referencing the id are left untouched.
    pub fn delete(&self, id: &RecordId) -> RegistryResult<()> {
        if !self.clients.delete(id)? {
            return Err(RegistryError::NotFound);
        }
        tracing::info!(client = %id, "deleted client");
        Ok(())
    }

    /// Free-text search over first name, last name, and phone number.
    /// An empty or absent query behaves exactly like [`list`](Self::list).
    pub fn search(&self, query: Option<&str>) -> RegistryResult<Vec<Client>> {
        match query {
            Some(q) if !q.trim().is_empty() => Ok(self.clients.find_text(q)?),
            _ => self.list(),
        }
    }
}

fn require(value: Option<String>, message: &str) -> RegistryResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RegistryError::Validation(message.into())),
    }
}

fn parse_gender(value: String) -> RegistryResult<Gender> {
    value
        .parse()
        .map_err(|e: carelink_types::TypeError| RegistryError::Validation(e.to_string()))
}
