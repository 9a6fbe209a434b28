//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the dashboard pages, the food-waste JSON API, the
//! websocket update feed, and the static stylesheet under a single Axum
//! router. CORS is fully open so kiosk clients on other origins can submit.

pub mod pages;
pub mod waste;
pub mod ws;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router. `static_dir` is served under `/static`.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::page))
        .route("/dashboard", get(pages::page))
        .route("/api/dashboard", get(pages::view))
        .route("/submit", post(waste::submit))
        .route("/food-waste/summary", get(waste::summary))
        .route("/food-waste/graph-data", get(waste::graph_data))
        .route("/food-waste/co2_emission", get(waste::co2_emission))
        .route("/food-waste/reasons", get(waste::reasons))
        .route("/food-waste/foods", get(waste::foods))
        .route("/food-waste/filter-by-date-and-reason", get(waste::filter_by_date_and_reason))
        .route("/ws/updates", get(ws::handle_updates))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
