use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use carelink_catalog::{NewProgram, ProgramPatch};
use carelink_types::Program;

use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

use super::parse_id;

const MISSING: &str = "Program not found";

pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProgram>,
) -> Result<(StatusCode, Json<Program>), ApiError> {
    let program = state.catalog.create(payload)?;
    Ok((StatusCode::CREATED, Json(program)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Program>>, ApiError> {
    Ok(Json(state.catalog.list()?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Program>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    Ok(Json(state.catalog.get(&id)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProgramPatch>,
) -> Result<Json<Program>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    Ok(Json(state.catalog.update(&id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    state.catalog.delete(&id)?;
    Ok(Json(json!({ "message": "Program removed" })))
}
