//! Explorer service: selection queries against the loaded dataset

use std::sync::Arc;

use shared::map::MapSettings;
use shared::{Catalog, ChartFigure, ClimateDataset, ClimateRecord, Location, MapFigure, Selection};

use crate::error::{AppError, AppResult};
use crate::services::DatasetLoader;

/// Read-only view over the shared dataset
#[derive(Clone)]
pub struct ExplorerService {
    dataset: Arc<ClimateDataset>,
}

impl ExplorerService {
    pub fn new(dataset: Arc<ClimateDataset>) -> Self {
        Self { dataset }
    }

    pub fn catalog(&self) -> Catalog {
        self.dataset.catalog()
    }

    /// Build the line chart for a selection
    pub fn chart(&self, selection: &Selection) -> ChartFigure {
        tracing::debug!(
            location = %selection.location,
            variable = %selection.variable,
            scenarios = ?selection.scenarios,
            models = ?selection.models,
            "Building chart"
        );
        let chart = self.dataset.chart(selection);
        if chart.is_empty() {
            tracing::debug!("Selection matched no records");
        }
        chart
    }

    pub fn records(&self, selection: &Selection) -> Vec<ClimateRecord> {
        self.dataset.select(selection)
    }

    /// Filtered records as a CSV document
    pub fn export_csv(&self, selection: &Selection) -> AppResult<String> {
        DatasetLoader::records_to_csv(&self.records(selection))
    }

    pub fn map(&self, selected: Option<&str>, settings: &MapSettings) -> MapFigure {
        self.dataset.map(selected, settings)
    }

    pub fn location(&self, name: &str) -> AppResult<Location> {
        self.dataset
            .find_location(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Location {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{ClimateRow, GpsCoordinates, Month};

    fn service() -> ExplorerService {
        let rows = vec![
            ClimateRow {
                location: "Hay River".to_string(),
                model: "MRI-CGCM3".to_string(),
                scenario: "rcp45".to_string(),
                year: 2040,
                month: Month::new(7).unwrap(),
                tas: Some(Decimal::new(171, 1)),
                pr: Some(Decimal::new(48, 0)),
            },
            ClimateRow {
                location: "Hay River".to_string(),
                model: "MRI-CGCM3".to_string(),
                scenario: "rcp45".to_string(),
                year: 2040,
                month: Month::new(8).unwrap(),
                tas: Some(Decimal::new(153, 1)),
                pr: Some(Decimal::new(52, 0)),
            },
        ];
        let locations = vec![Location::new(
            "Hay River",
            GpsCoordinates::new(Decimal::new(6082, 2), Decimal::new(-11568, 2)),
        )];
        ExplorerService::new(Arc::new(ClimateDataset::new(rows, locations)))
    }

    fn summer() -> Selection {
        Selection {
            location: "Hay River".to_string(),
            scenarios: vec!["rcp45".to_string()],
            models: vec!["MRI-CGCM3".to_string()],
            months: [7, 8].into_iter().filter_map(Month::new).collect(),
            ..Selection::default()
        }
    }

    #[test]
    fn test_records_are_averaged() {
        let records = service().records(&summer());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, Decimal::new(162, 1));
        assert_eq!(records[0].month.to_string(), "avg_7_8");
    }

    #[test]
    fn test_export_csv() {
        let csv = service().export_csv(&summer()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("model,scenario,year,month,value"));
        let value = lines
            .next()
            .and_then(|line| line.strip_prefix("MRI-CGCM3,rcp45,2040,avg_7_8,"))
            .unwrap();
        assert_eq!(value.parse::<Decimal>().unwrap(), Decimal::new(162, 1));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_unknown_location_not_found() {
        let err = service().location("Atlantis").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(service().location("Hay River").unwrap().name, "Hay River");
    }

    #[test]
    fn test_empty_selection_gives_empty_chart() {
        let selection = Selection {
            models: Vec::new(),
            ..summer()
        };
        assert!(service().chart(&selection).is_empty());
    }
}
