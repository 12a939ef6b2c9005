//! Catalog handler: options for the UI controls

use axum::{extract::State, Json};
use serde::Serialize;
use shared::Catalog;

use crate::services::ExplorerService;
use crate::AppState;

#[derive(Serialize)]
pub struct CatalogResponse {
    #[serde(flatten)]
    pub catalog: Catalog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
}

/// Get locations, variables, scenarios, models, months and year bounds
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let service = ExplorerService::new(state.dataset.clone());
    Json(CatalogResponse {
        catalog: service.catalog(),
        tracking_id: state.config.analytics.tracking_id.clone(),
    })
}
