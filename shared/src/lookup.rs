//! Lookup tables for labels and line colours
//!
//! Keys not listed here still plot: they fall back to the raw key as label
//! and a neutral grey line.

use crate::types::OptionItem;

/// Climate scenarios offered in the UI, in display order
pub const SCENARIOS: &[(&str, &str)] = &[
    ("rcp45", "4.5 Scenario"),
    ("rcp60", "6.0 Scenario"),
    ("rcp85", "8.5 Scenario"),
];

/// Climate models offered in the UI, in display order
pub const MODELS: &[(&str, &str)] = &[
    ("GISS-E2-R", "GISS-E2-R"),
    ("GFDL-CM3", "GFDL-CM3"),
    ("5ModelAvg", "Five Model Average"),
    ("IPSL-CM5A-LR", "IPSL-CM5A-LR"),
    ("MRI-CGCM3", "MRI-CGCM3"),
    ("NCAR-CCSM4", "NCAR-CCSM4"),
];

/// Line colour per model, indexed by the position of the scenario in
/// [`SCENARIOS`]
const SERIES_COLORS: &[(&str, [&str; 3])] = &[
    ("GISS-E2-R", ["#FDD017", "#F2BB66", "#EAC117"]),
    ("GFDL-CM3", ["#6AA121", "#347C17", "#254117"]),
    ("5ModelAvg", ["#736F6E", "#463E3F", "#2B1B17"]),
    ("IPSL-CM5A-LR", ["#C24641", "#7E3517", "#800517"]),
    ("MRI-CGCM3", ["#4863A0", "#2B547E", "#151B54"]),
    ("NCAR-CCSM4", ["#C35817", "#6F4E37", "#493D26"]),
];

pub const DEFAULT_SERIES_COLOR: &str = "#808080";

fn lookup<'a>(table: &[(&str, &'static str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

pub fn scenario_label(key: &str) -> &str {
    lookup(SCENARIOS, key)
}

pub fn model_label(key: &str) -> &str {
    lookup(MODELS, key)
}

/// Fixed colour for a model/scenario pair
pub fn series_color(model: &str, scenario: &str) -> &'static str {
    let scenario_index = SCENARIOS.iter().position(|(key, _)| *key == scenario);
    let colors = SERIES_COLORS
        .iter()
        .find(|(key, _)| *key == model)
        .map(|(_, colors)| colors);

    match (colors, scenario_index) {
        (Some(colors), Some(index)) => colors[index],
        _ => DEFAULT_SERIES_COLOR,
    }
}

/// Sort position of a key in a table; unknown keys go last
fn rank(table: &[(&str, &str)], key: &str) -> usize {
    table
        .iter()
        .position(|(k, _)| *k == key)
        .unwrap_or(table.len())
}

fn options<'a>(table: &[(&str, &'static str)], keys: impl IntoIterator<Item = &'a str>) -> Vec<OptionItem> {
    let mut keys: Vec<&str> = keys.into_iter().collect();
    keys.sort_by(|a, b| rank(table, a).cmp(&rank(table, b)).then_with(|| a.cmp(b)));
    keys.dedup();
    keys.into_iter()
        .map(|key| OptionItem::new(key, lookup(table, key)))
        .collect()
}

/// Dropdown options for the scenarios present in the data
pub fn scenario_options<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<OptionItem> {
    options(SCENARIOS, keys)
}

/// Dropdown options for the models present in the data
pub fn model_options<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<OptionItem> {
    options(MODELS, keys)
}
