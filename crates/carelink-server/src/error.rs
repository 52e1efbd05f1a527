use std::sync::OnceLock;

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use carelink_catalog::CatalogError;
use carelink_ledger::LedgerError;
use carelink_registry::RegistryError;

use crate::config::Environment;

/// Errors from server startup and configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// Record the deployment environment for error-body rendering. First call
/// wins; later calls are ignored.
pub fn set_environment(env: Environment) {
    let _ = ENVIRONMENT.set(env);
}

fn stack_enabled() -> bool {
    !ENVIRONMENT
        .get()
        .copied()
        .unwrap_or_default()
        .is_production()
}

/// Per-request error, mapped onto the API's error contract: 400 for
/// validation failures, 404 for missing records, 500 for store faults.
/// Every body is `{"message": ...}`; 500s additionally carry a `stack`
/// field, null in production.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn internal(err: impl std::fmt::Display + std::fmt::Debug) -> Self {
        Self::Internal {
            message: err.to_string(),
            detail: format!("{err:?}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            Self::Internal { message, detail } => {
                tracing::error!(error = %detail, "request failed");
                let stack = if stack_enabled() {
                    json!(detail)
                } else {
                    json!(null)
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message, "stack": stack })),
                )
                    .into_response()
            }
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(message) => Self::Validation(message),
            RegistryError::NotFound => Self::NotFound("Client not found".into()),
            RegistryError::Store(e) => Self::internal(e),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(message) => Self::Validation(message),
            CatalogError::NotFound => Self::NotFound("Program not found".into()),
            CatalogError::Store(e) => Self::internal(e),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ClientNotFound => Self::NotFound("Client not found".into()),
            LedgerError::ProgramNotFound => Self::NotFound("Program not found".into()),
            LedgerError::NotFound => Self::NotFound("Enrollment not found".into()),
            LedgerError::AlreadyEnrolled => {
                Self::Validation("Client is already enrolled in this program".into())
            }
            LedgerError::Validation(message) => Self::Validation(message),
            LedgerError::Store(e) => Self::internal(e),
        }
    }
}

/// JSON extractor whose rejection follows the API error contract: a body
/// that fails to parse is a 400 validation failure, not a bare 422.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}
