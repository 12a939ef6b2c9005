//! Data preparation: wide monthly tables to long decadal means
//!
//! Raw model output arrives as one wide table per (model, scenario,
//! variable): a row per year and month, a column per location. Preparation
//! melts those into long observations, joins temperature and precipitation,
//! and reduces annual values to decadal means over complete decades only.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ClimateRow, Month, Variable};

/// Sentinel used by the source rasters for missing values
pub const NODATA: Decimal = Decimal::from_parts(9999, 0, 0, true, 0);

/// Years in a decade bucket
pub const DECADE_LENGTH: usize = 10;

/// Wide table: one value column per location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WideTable {
    pub locations: Vec<String>,
    pub rows: Vec<WideRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WideRow {
    pub year: i32,
    pub month: Month,
    /// Aligned with [`WideTable::locations`]
    pub values: Vec<Option<Decimal>>,
}

/// Long-form single-variable observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub location: String,
    pub model: String,
    pub scenario: String,
    pub year: i32,
    pub month: Month,
    pub value: Option<Decimal>,
}

type RowKey = (String, String, String, i32, Month);

/// Start year of the decade containing `year`
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Melt a wide table into one observation per (location, year, month).
///
/// [`NODATA`] cells become missing values.
pub fn melt_wide(table: &WideTable, model: &str, scenario: &str) -> Vec<Observation> {
    table
        .rows
        .iter()
        .flat_map(|row| {
            table
                .locations
                .iter()
                .zip(row.values.iter())
                .map(move |(location, value)| Observation {
                    location: location.clone(),
                    model: model.to_string(),
                    scenario: scenario.to_string(),
                    year: row.year,
                    month: row.month,
                    value: value.filter(|v| *v != NODATA),
                })
        })
        .collect()
}

/// Join per-variable observations into rows carrying both variables
pub fn merge_variables(tas: Vec<Observation>, pr: Vec<Observation>) -> Vec<ClimateRow> {
    let mut merged: BTreeMap<RowKey, (Option<Decimal>, Option<Decimal>)> = BTreeMap::new();

    for (variable, observations) in [(Variable::Tas, tas), (Variable::Pr, pr)] {
        for obs in observations {
            let key = (obs.location, obs.model, obs.scenario, obs.year, obs.month);
            let entry = merged.entry(key).or_default();
            match variable {
                Variable::Tas => entry.0 = obs.value,
                Variable::Pr => entry.1 = obs.value,
            }
        }
    }

    merged
        .into_iter()
        .map(|((location, model, scenario, year, month), (tas, pr))| ClimateRow {
            location,
            model,
            scenario,
            year,
            month,
            tas,
            pr,
        })
        .collect()
}

#[derive(Default)]
struct DecadeBucket {
    years: BTreeSet<i32>,
    tas: Vec<Decimal>,
    pr: Vec<Decimal>,
}

fn rounded_mean(values: &[Decimal], variable: Variable) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().sum();
    Some((total / Decimal::from(values.len())).round_dp(variable.precision()))
}

/// Reduce annual monthly rows to decadal monthly means.
///
/// Rows are grouped by (location, model, scenario, decade, month). A decade
/// is complete when all twelve months have ten years of data; for each
/// (location, model, scenario) only decades between the first and last
/// complete decade are kept. Missing values are ignored in the means.
pub fn decadal_means(rows: &[ClimateRow]) -> Vec<ClimateRow> {
    type SeriesKey<'a> = (&'a str, &'a str, &'a str);

    let mut series: BTreeMap<SeriesKey, BTreeMap<(i32, Month), DecadeBucket>> = BTreeMap::new();
    for row in rows {
        let bucket = series
            .entry((row.location.as_str(), row.model.as_str(), row.scenario.as_str()))
            .or_default()
            .entry((decade_of(row.year), row.month))
            .or_default();
        bucket.years.insert(row.year);
        bucket.tas.extend(row.tas);
        bucket.pr.extend(row.pr);
    }

    let mut out = Vec::new();
    for ((location, model, scenario), buckets) in series {
        let decades: BTreeSet<i32> = buckets.keys().map(|(decade, _)| *decade).collect();
        let complete: Vec<i32> = decades
            .into_iter()
            .filter(|decade| {
                Month::all().all(|month| {
                    buckets
                        .get(&(*decade, month))
                        .is_some_and(|bucket| bucket.years.len() == DECADE_LENGTH)
                })
            })
            .collect();

        let (Some(&first), Some(&last)) = (complete.first(), complete.last()) else {
            continue;
        };

        for ((decade, month), bucket) in &buckets {
            if *decade < first || *decade > last {
                continue;
            }
            out.push(ClimateRow {
                location: location.to_string(),
                model: model.to_string(),
                scenario: scenario.to_string(),
                year: *decade,
                month: *month,
                tas: rounded_mean(&bucket.tas, Variable::Tas),
                pr: rounded_mean(&bucket.pr, Variable::Pr),
            });
        }
    }
    out
}
