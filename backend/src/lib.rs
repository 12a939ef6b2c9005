//! NWT Climate Explorer - backend server
//!
//! Serves decadal temperature and precipitation projections for communities
//! and mine sites in the Northwest Territories as chart and map figures.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::ClimateDataset;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<ClimateDataset>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let prefix = state.config.path_prefix();

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .with_state(state);

    let app = if prefix == "/" {
        app
    } else {
        Router::new().nest(&prefix, app)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Root endpoint
async fn root() -> &'static str {
    "NWT Climate Explorer API v1.0"
}
