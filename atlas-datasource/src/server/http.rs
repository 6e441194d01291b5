use axum::{http::StatusCode, Json};
use serde_json::Value;

use crate::core::AtlasError;

/// Map a failure to the endpoint's error status and a JSON body.
///
/// Upstream failures forward the monitoring API's error body; a body the dashboard sent
/// that could not be decoded is always a 400.
pub fn map_error(err: AtlasError, failure_status: StatusCode) -> (StatusCode, Json<Value>) {
    let status = match err {
        AtlasError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => failure_status,
    };
    tracing::warn!("request failed with {}: {}", status, err);
    (status, Json(err.body()))
}
