//! Location handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shared::Location;

use crate::error::AppResult;
use crate::services::ExplorerService;
use crate::AppState;

/// Get a single location by name
pub async fn get_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Location>> {
    let service = ExplorerService::new(state.dataset.clone());
    let location = service.location(&name)?;
    Ok(Json(location))
}
