//! WebAssembly module for the NWT Climate Explorer
//!
//! Runs the filter/aggregate/plot pipeline in the browser against a record
//! set fetched once from the server:
//! - Record selection and month averaging
//! - Chart figure and plot title construction
//! - Selection input validation

use js_sys::Array;
use wasm_bindgen::prelude::*;

use shared::chart::{build_chart, build_plot_title};
use shared::lookup;
use shared::pipeline;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("NWT Climate Explorer pipeline loaded"));
}

fn parse_json<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn select_json(rows_json: &str, selection_json: &str) -> Result<String, String> {
    let rows: Vec<ClimateRow> = parse_json("rows", rows_json)?;
    let selection: Selection = parse_json("selection", selection_json)?;
    to_json(&pipeline::select(&rows, &selection))
}

fn chart_json(rows_json: &str, selection_json: &str) -> Result<String, String> {
    let rows: Vec<ClimateRow> = parse_json("rows", rows_json)?;
    let selection: Selection = parse_json("selection", selection_json)?;
    let records = pipeline::select(&rows, &selection);
    to_json(&build_chart(&records, &selection, selection.location_label()))
}

fn title(selection_json: &str) -> Result<String, String> {
    let selection: Selection = parse_json("selection", selection_json)?;
    Ok(build_plot_title(selection.location_label(), &selection))
}

/// Filter and month-average rows; returns records as JSON
#[wasm_bindgen]
pub fn select_records(rows_json: &str, selection_json: &str) -> Result<String, JsValue> {
    select_json(rows_json, selection_json).map_err(|e| JsValue::from_str(&e))
}

/// Build the chart figure JSON for a selection
#[wasm_bindgen]
pub fn chart_figure(rows_json: &str, selection_json: &str) -> Result<String, JsValue> {
    chart_json(rows_json, selection_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn plot_title(selection_json: &str) -> Result<String, JsValue> {
    title(selection_json).map_err(|e| JsValue::from_str(&e))
}

/// Line colour for a model/scenario pair
#[wasm_bindgen]
pub fn series_color(model: &str, scenario: &str) -> String {
    lookup::series_color(model, scenario).to_string()
}

/// Month names in calendar order
#[wasm_bindgen]
pub fn month_names() -> Array {
    Month::all()
        .map(|month| JsValue::from_str(month.name()))
        .collect()
}

/// Validate a comma separated month list (e.g. "12,1,2")
#[wasm_bindgen]
pub fn validate_months(raw: &str) -> bool {
    parse_months(raw).is_ok()
}
