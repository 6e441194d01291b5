use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::catalog::catalog;
use crate::core::{AtlasError, Credentials};
use crate::query::{execute, QueryPlan, QueryRequest};
use crate::server::app::AppState;
use crate::server::http::map_error;

pub async fn query(
    State(state): State<Arc<AppState>>,
    creds: Credentials,
    body: Bytes,
) -> Response {
    let req: QueryRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            let err = AtlasError::InvalidRequest(e.to_string());
            return map_error(err, StatusCode::INTERNAL_SERVER_ERROR).into_response();
        }
    };

    let plan = QueryPlan::build(&req, catalog());
    match execute(
        state.api.as_ref(),
        &creds,
        &plan,
        catalog(),
        state.series_options,
    )
    .await
    {
        Ok(series) => Json(series).into_response(),
        Err(e) => map_error(e, StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}
