use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use carelink_registry::{ClientPatch, NewClient};
use carelink_types::Client;

use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

use super::parse_id;

const MISSING: &str = "Client not found";

pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewClient>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = state.registry.register(payload)?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.registry.list()?))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.registry.search(params.query.as_deref())?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    Ok(Json(state.registry.get(&id)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ClientPatch>,
) -> Result<Json<Client>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    Ok(Json(state.registry.update(&id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, MISSING)?;
    state.registry.delete(&id)?;
    Ok(Json(json!({ "message": "Client removed" })))
}
