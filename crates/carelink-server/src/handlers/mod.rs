pub mod clients;
pub mod enrollments;
pub mod programs;

use carelink_types::RecordId;

use crate::error::ApiError;

/// Root handler, used by the dashboard as a liveness probe.
pub async fn root() -> &'static str {
    "API is running"
}

/// Parse a path id. A malformed id is indistinguishable from a missing
/// record to callers, so it reports the same NotFound message.
fn parse_id(raw: &str, missing: &str) -> Result<RecordId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(missing.to_string()))
}
