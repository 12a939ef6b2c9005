//! Record export handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::chart::SelectionQuery;
use crate::services::ExplorerService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Get filtered (and month-averaged) records
pub async fn get_records(
    State(state): State<AppState>,
    query: Result<Query<SelectionQuery>, QueryRejection>,
    Query(format): Query<FormatQuery>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query?;
    let selection = query.into_selection()?;
    let service = ExplorerService::new(state.dataset.clone());

    if format.format.as_deref() == Some("csv") {
        let csv = service.export_csv(&selection)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"climate_records.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(service.records(&selection)).into_response())
    }
}
