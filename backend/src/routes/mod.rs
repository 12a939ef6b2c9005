//! Route definitions for the NWT Climate Explorer

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/chart", get(handlers::get_chart).post(handlers::post_chart))
        .route("/records", get(handlers::get_records))
        .route("/map", get(handlers::get_map))
        .route("/locations/:name", get(handlers::get_location))
}
