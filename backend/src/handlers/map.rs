//! Map handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::MapFigure;

use crate::services::ExplorerService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub location: Option<String>,
}

/// Get the location map, highlighting the selected location if known
pub async fn get_map(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Json<MapFigure> {
    let service = ExplorerService::new(state.dataset.clone());
    let settings = state.config.map_settings();
    Json(service.map(query.location.as_deref(), &settings))
}
