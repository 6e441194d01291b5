use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, Method},
    routing::{any, get},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{connection::check_connection, query::query, search::search};
use super::ServerArgs;
use crate::atlas::{AtlasApi, AtlasClient};
use crate::query::{PointFilter, SeriesOptions};

pub struct AppState {
    pub api: Arc<dyn AtlasApi>,
    pub series_options: SeriesOptions,
}

impl AppState {
    pub fn new(api: Arc<dyn AtlasApi>, series_options: SeriesOptions) -> Self {
        Self {
            api,
            series_options,
        }
    }
}

#[derive(serde::Serialize)]
struct HealthDto {
    status: &'static str,
}

pub fn create_app_state(args: &ServerArgs) -> Result<Arc<AppState>> {
    let cfg = args.atlas_config();
    tracing::info!("Using Atlas API at {}", cfg.base_url);

    let client = AtlasClient::new(cfg)?;
    let series_options = SeriesOptions {
        point_filter: PointFilter::from_keep_zero(args.keep_zero_values),
        label_disk_partitions: args.label_disk_partitions,
    };

    Ok(Arc::new(AppState::new(Arc::new(client), series_options)))
}

// Datasource endpoints (any method; the dashboard POSTs JSON)
// - /        connection check used when the datasource is saved. Returns the cluster's hosts,
//            401 with the upstream error body when the credentials are rejected.
// - /search  metric catalog for the panel editor, as [{text, value}].
// - /query   time series for the requested metrics over the requested range.
// - GET /health  liveness only, never calls upstream.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::POST])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE]);

    Router::new()
        .route("/", any(check_connection))
        .route("/search", any(search))
        .route("/query", any(query))
        .route("/health", get(health))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}
