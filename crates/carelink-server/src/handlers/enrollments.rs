use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use carelink_ledger::{ClientEnrollmentView, EnrollmentPatch, EnrollmentView};
use carelink_types::Enrollment;

use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

use super::parse_id;

const MISSING: &str = "Enrollment not found";

/// Creation payload as it arrives off the wire. Reference ids are kept as
/// strings so a malformed id reports NotFound, matching lookup semantics,
/// instead of failing JSON extraction.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollBody {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub program_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn enroll(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EnrollBody>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    let client_id = parse_id(body.client_id.as_deref().unwrap_or_default(), "Client not found")?;
    let program_id =
        parse_id(body.program_id.as_deref().unwrap_or_default(), "Program not found")?;

    let enrollment = state.ledger.enroll(carelink_ledger::EnrollmentRequest {
        client_id,
        program_id,
        notes: body.notes,
    })?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<EnrollmentView>>, ApiError> {
    Ok(Json(state.ledger.list()?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrollmentView>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    Ok(Json(state.ledger.get(&id)?))
}

pub async fn list_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<ClientEnrollmentView>>, ApiError> {
    // An unparseable client id matches nothing, like any other unknown id.
    let Ok(client_id) = client_id.parse() else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(state.ledger.list_by_client(&client_id)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EnrollmentPatch>,
) -> Result<Json<Enrollment>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    Ok(Json(state.ledger.update(&id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    state.ledger.delete(&id)?;
    Ok(Json(json!({ "message": "Enrollment removed" })))
}
