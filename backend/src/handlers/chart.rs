//! Chart handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use shared::{
    parse_list, parse_months, parse_variable, parse_year, ChartFigure, Selection, YearRange,
};

use crate::error::AppResult;
use crate::services::ExplorerService;
use crate::AppState;

/// Selection expressed as query parameters.
///
/// Lists are comma separated; absent fields keep the initial UI values.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub location: Option<String>,
    pub scenarios: Option<String>,
    pub models: Option<String>,
    pub variable: Option<String>,
    pub months: Option<String>,
    pub all_months: Option<bool>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl SelectionQuery {
    pub fn into_selection(self) -> AppResult<Selection> {
        let defaults = Selection::default();

        let variable = match self.variable {
            Some(raw) => parse_variable(&raw)?,
            None => defaults.variable,
        };
        let months = match self.months {
            Some(raw) => parse_months(&raw)?,
            None => defaults.months,
        };
        let start = match self.start {
            Some(raw) => parse_year(&raw)?,
            None => defaults.years.start,
        };
        let end = match self.end {
            Some(raw) => parse_year(&raw)?,
            None => defaults.years.end,
        };

        Ok(Selection {
            location: self.location.unwrap_or(defaults.location),
            scenarios: self.scenarios.as_deref().map(parse_list).unwrap_or(defaults.scenarios),
            models: self.models.as_deref().map(parse_list).unwrap_or(defaults.models),
            variable,
            months,
            all_months: self.all_months.unwrap_or(defaults.all_months),
            years: YearRange::new(start, end),
        })
    }
}

/// Get the chart for a query-string selection
pub async fn get_chart(
    State(state): State<AppState>,
    query: Result<Query<SelectionQuery>, QueryRejection>,
) -> AppResult<Json<ChartFigure>> {
    let Query(query) = query?;
    let selection = query.into_selection()?;
    let service = ExplorerService::new(state.dataset.clone());
    Ok(Json(service.chart(&selection)))
}

/// Get the chart for a JSON selection
pub async fn post_chart(
    State(state): State<AppState>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> AppResult<Json<ChartFigure>> {
    let Json(selection) = payload?;
    let service = ExplorerService::new(state.dataset.clone());
    Ok(Json(service.chart(&selection)))
}
