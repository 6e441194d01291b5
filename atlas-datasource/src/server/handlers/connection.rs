use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::atlas::resolve_hosts;
use crate::core::Credentials;
use crate::server::app::AppState;
use crate::server::http::map_error;

/// Called when the datasource is saved, to check that the credentials reach a cluster.
pub async fn check_connection(State(state): State<Arc<AppState>>, creds: Credentials) -> Response {
    match resolve_hosts(state.api.as_ref(), &creds).await {
        Ok(hosts) => Json(hosts).into_response(),
        Err(e) => map_error(e, StatusCode::UNAUTHORIZED).into_response(),
    }
}
