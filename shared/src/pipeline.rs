//! Filter and aggregate stage
//!
//! Turns the full reference dataset plus a [`Selection`] into the record set
//! that gets plotted. Nothing here fails: selections that match nothing
//! produce an empty result.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::models::{ClimateRecord, ClimateRow, MonthKey, Selection};
use crate::types::YearRange;

/// Subset rows by location, scenarios, models, years and months.
///
/// Rows without a value for the selected variable are skipped.
pub fn filter_rows(rows: &[ClimateRow], selection: &Selection) -> Vec<ClimateRecord> {
    if selection.scenarios.is_empty() || selection.models.is_empty() || selection.years.is_empty() {
        return Vec::new();
    }

    let months = selection.effective_months();

    rows.iter()
        .filter(|row| row.location == selection.location)
        .filter(|row| selection.scenarios.contains(&row.scenario))
        .filter(|row| selection.models.contains(&row.model))
        .filter(|row| selection.years.contains(row.year))
        .filter(|row| months.contains(&row.month))
        .filter_map(|row| {
            row.value(selection.variable).map(|value| ClimateRecord {
                model: row.model.clone(),
                scenario: row.scenario.clone(),
                year: row.year,
                month: MonthKey::Single(row.month),
                value,
            })
        })
        .collect()
}

/// Keep records with `range.start <= year <= range.end`
pub fn filter_year_range(records: &[ClimateRecord], range: YearRange) -> Vec<ClimateRecord> {
    records
        .iter()
        .filter(|record| range.contains(record.year))
        .cloned()
        .collect()
}

/// Collapse multi-month records into one monthly average per
/// (model, scenario, year).
///
/// When the records cover a single month key they are returned unchanged.
/// Otherwise every output row carries the average tag of all months present
/// and the arithmetic mean of that year's values.
pub fn average_months(records: &[ClimateRecord]) -> Vec<ClimateRecord> {
    let keys: BTreeSet<&MonthKey> = records.iter().map(|record| &record.month).collect();
    if keys.len() <= 1 {
        return records.to_vec();
    }

    let tag = MonthKey::average(keys.iter().flat_map(|key| key.months()));

    let mut groups: BTreeMap<(&str, &str, i32), Vec<Decimal>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.model.as_str(), record.scenario.as_str(), record.year))
            .or_default()
            .push(record.value);
    }

    groups
        .into_iter()
        .map(|((model, scenario, year), values)| ClimateRecord {
            model: model.to_string(),
            scenario: scenario.to_string(),
            year,
            month: tag.clone(),
            value: mean(&values),
        })
        .collect()
}

/// Filter then aggregate
pub fn select(rows: &[ClimateRow], selection: &Selection) -> Vec<ClimateRecord> {
    average_months(&filter_rows(rows, selection))
}

// Groups are built from at least one record, so `values` is never empty.
fn mean(values: &[Decimal]) -> Decimal {
    let total: Decimal = values.iter().sum();
    total / Decimal::from(values.len())
}
