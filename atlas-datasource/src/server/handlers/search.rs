use axum::{body::Bytes, Json};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{catalog, SearchEntry};

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub target: Option<String>,
}

/// Lists the metric catalog for the panel editor.
///
/// Only the empty search is answered; a non-empty search term currently matches nothing.
pub async fn search(body: Bytes) -> Json<Vec<SearchEntry>> {
    let req: SearchRequest = serde_json::from_slice(&body).unwrap_or_default();
    debug!(?req, "search");

    match req.target.as_deref() {
        None | Some("") => Json(catalog().search_entries()),
        // TODO: match the search term against metric names and labels
        Some(_) => Json(Vec::new()),
    }
}
