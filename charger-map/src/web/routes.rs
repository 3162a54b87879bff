//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::style::CircleLayerStyle;
use super::templates::{IndexTemplate, InitialView, POLL_INTERVAL_MS};

const SITES_PATH: &str = "/api/sites";
const STYLE_PATH: &str = "/api/style";
const STATUS_PATH: &str = "/api/status";
const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route(SITES_PATH, get(sites))
        .route(STYLE_PATH, get(style))
        .route(STATUS_PATH, get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page.
async fn index_page() -> impl IntoResponse {
    let template = IndexTemplate {
        view: InitialView::default(),
        sites_url: SITES_PATH,
        style_url: STYLE_PATH,
        status_url: STATUS_PATH,
        poll_interval_ms: POLL_INTERVAL_MS,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// The live feature collection as GeoJSON.
async fn sites(State(state): State<AppState>) -> impl IntoResponse {
    let collection = state.store.current().await;

    match serde_json::to_string(collection.as_ref()) {
        Ok(body) => ([(header::CONTENT_TYPE, GEOJSON_CONTENT_TYPE)], body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Serialization error: {}", e),
        )
            .into_response(),
    }
}

/// Marker style descriptor.
async fn style(State(state): State<AppState>) -> Json<CircleLayerStyle> {
    Json((*state.style).clone())
}

/// Publication status.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub feature_count: usize,
    pub published_at: Option<DateTime<Utc>>,
    pub publications: u64,
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.store.snapshot().await;
    Json(StatusResponse {
        feature_count: snapshot.collection.features.len(),
        published_at: snapshot.published_at,
        publications: snapshot.publications,
    })
}
