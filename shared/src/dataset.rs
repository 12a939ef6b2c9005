//! In-memory reference dataset and the UI catalog derived from it

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::build_chart;
use crate::lookup::{model_options, scenario_options};
use crate::map::{build_map, MapSettings};
use crate::models::{
    ChartFigure, ClimateRecord, ClimateRow, Location, MapFigure, Month, Selection, Variable,
    DOMAIN_LABEL, DOMAIN_LOCATION,
};
use crate::pipeline;
use crate::types::OptionItem;

/// Read-only climate data loaded once at startup
#[derive(Debug, Clone)]
pub struct ClimateDataset {
    rows: Vec<ClimateRow>,
    locations: Vec<Location>,
    loaded_at: DateTime<Utc>,
}

/// Month option for the month picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthOption {
    pub value: u8,
    pub label: String,
}

/// Bounds and tick marks for the year range slider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
    pub marks: Vec<i32>,
}

/// Everything the UI needs to populate its controls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub locations: Vec<Location>,
    /// Territory-wide option, present when domain means were loaded
    pub domain: Option<OptionItem>,
    pub variables: Vec<OptionItem>,
    pub scenarios: Vec<OptionItem>,
    pub models: Vec<OptionItem>,
    pub months: Vec<MonthOption>,
    pub years: Option<YearBounds>,
    pub defaults: Selection,
}

impl ClimateDataset {
    pub fn new(rows: Vec<ClimateRow>, locations: Vec<Location>) -> Self {
        Self {
            rows,
            locations,
            loaded_at: Utc::now(),
        }
    }

    pub fn rows(&self) -> &[ClimateRow] {
        &self.rows
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn find_location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.name == name)
    }

    /// Filtered and, for multi-month selections, averaged records
    pub fn select(&self, selection: &Selection) -> Vec<ClimateRecord> {
        pipeline::select(&self.rows, selection)
    }

    /// Chart for a selection; an empty selection gives an empty chart
    pub fn chart(&self, selection: &Selection) -> ChartFigure {
        let records = self.select(selection);
        build_chart(&records, selection, selection.location_label())
    }

    pub fn map(&self, selected: Option<&str>, settings: &MapSettings) -> MapFigure {
        build_map(&self.locations, selected, settings)
    }

    /// Whether territory-wide rows were loaded
    pub fn has_domain(&self) -> bool {
        self.rows.iter().any(|row| row.location == DOMAIN_LOCATION)
    }

    /// Distinct decade years present, ascending
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.rows.iter().map(|row| row.year).collect();
        years.into_iter().collect()
    }

    pub fn catalog(&self) -> Catalog {
        let years = self.years();
        let year_bounds = match (years.first(), years.last()) {
            (Some(&min), Some(&max)) => Some(YearBounds {
                min,
                max,
                marks: years.iter().copied().step_by(2).collect(),
            }),
            _ => None,
        };

        let variables = Variable::ALL
            .iter()
            .filter(|variable| self.rows.iter().any(|row| row.value(**variable).is_some()))
            .map(|variable| OptionItem::new(variable.key(), variable.label()))
            .collect();

        let mut defaults = Selection::default();
        if self.find_location(&defaults.location).is_none() {
            if let Some(first) = self.locations.first() {
                defaults.location = first.name.clone();
            }
        }
        if let Some(bounds) = &year_bounds {
            defaults.years.start = bounds.min;
            defaults.years.end = bounds.max;
        }

        Catalog {
            locations: self.locations.clone(),
            domain: self
                .has_domain()
                .then(|| OptionItem::new(DOMAIN_LOCATION, DOMAIN_LABEL)),
            variables,
            scenarios: scenario_options(self.rows.iter().map(|row| row.scenario.as_str())),
            models: model_options(self.rows.iter().map(|row| row.model.as_str())),
            months: Month::all()
                .map(|month| MonthOption {
                    value: month.number(),
                    label: month.name().to_string(),
                })
                .collect(),
            years: year_bounds,
            defaults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GpsCoordinates;
    use rust_decimal::Decimal;

    fn row(location: &str, model: &str, scenario: &str, year: i32, month: u8) -> ClimateRow {
        ClimateRow {
            location: location.to_string(),
            model: model.to_string(),
            scenario: scenario.to_string(),
            year,
            month: Month::new(month).unwrap(),
            tas: Some(Decimal::new(-105, 1)),
            pr: None,
        }
    }

    fn dataset() -> ClimateDataset {
        let rows = [2010, 2020, 2030, 2040, 2050]
            .into_iter()
            .flat_map(|year| {
                vec![
                    row("Inuvik", "NCAR-CCSM4", "rcp85", year, 1),
                    row("Inuvik", "GFDL-CM3", "rcp45", year, 1),
                ]
            })
            .collect();
        let locations = vec![Location::new(
            "Inuvik",
            GpsCoordinates::new(Decimal::new(6836, 2), Decimal::new(-13372, 2)),
        )];
        ClimateDataset::new(rows, locations)
    }

    #[test]
    fn test_catalog_options() {
        let catalog = dataset().catalog();

        let models: Vec<&str> = catalog.models.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(models, vec!["GFDL-CM3", "NCAR-CCSM4"]);
        let scenarios: Vec<&str> = catalog.scenarios.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(scenarios, vec!["rcp45", "rcp85"]);
        assert_eq!(catalog.variables, vec![OptionItem::new("tas", "Temperature")]);
        assert_eq!(catalog.months.len(), 12);
    }

    #[test]
    fn test_catalog_years_and_defaults() {
        let catalog = dataset().catalog();

        let years = catalog.years.unwrap();
        assert_eq!((years.min, years.max), (2010, 2050));
        assert_eq!(years.marks, vec![2010, 2030, 2050]);
        assert_eq!(catalog.defaults.location, "Inuvik");
        assert_eq!(catalog.defaults.years.start, 2010);
    }

    #[test]
    fn test_domain_rows_in_catalog_and_chart() {
        let mut data = dataset();
        assert!(data.catalog().domain.is_none());

        data.rows.push(row(DOMAIN_LOCATION, "NCAR-CCSM4", "rcp85", 2010, 1));
        let catalog = data.catalog();
        assert_eq!(
            catalog.domain,
            Some(OptionItem::new("NWT-wide", "Northwest Territories"))
        );

        let selection = Selection {
            location: DOMAIN_LOCATION.to_string(),
            scenarios: vec!["rcp85".to_string()],
            months: [Month::new(1).unwrap()].into_iter().collect(),
            ..Selection::default()
        };
        let chart = data.chart(&selection);
        assert_eq!(chart.data.len(), 1);
        assert_eq!(chart.data[0].x, vec![2010]);
        assert!(chart.layout.title.starts_with("Northwest Territories<br>"));
    }

    #[test]
    fn test_empty_dataset_catalog() {
        let catalog = ClimateDataset::new(Vec::new(), Vec::new()).catalog();
        assert!(catalog.years.is_none());
        assert!(catalog.models.is_empty());
    }

    #[test]
    fn test_chart_for_selection() {
        let selection = Selection {
            location: "Inuvik".to_string(),
            months: [Month::new(1).unwrap()].into_iter().collect(),
            ..Selection::default()
        };
        let chart = dataset().chart(&selection);

        assert_eq!(chart.data.len(), 1);
        assert_eq!(chart.data[0].x, vec![2010, 2020, 2030, 2040, 2050]);
    }
}
