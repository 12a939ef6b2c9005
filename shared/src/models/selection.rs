//! User selection state

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Month, Variable};
use crate::types::YearRange;

/// Location selected when the UI first loads
pub const DEFAULT_LOCATION: &str = "Yellowknife";

/// Reserved location key for territory-wide means
pub const DOMAIN_LOCATION: &str = "NWT-wide";

/// Display name of [`DOMAIN_LOCATION`]
pub const DOMAIN_LABEL: &str = "Northwest Territories";

/// Everything the UI controls decide about what to plot.
///
/// Held per interaction and never persisted. Missing JSON fields take the
/// initial UI values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selection {
    pub location: String,
    pub scenarios: Vec<String>,
    pub models: Vec<String>,
    pub variable: Variable,
    pub months: BTreeSet<Month>,
    /// Overrides `months` with all twelve months (annual mean)
    pub all_months: bool,
    pub years: YearRange,
}

impl Selection {
    /// Whether the selection targets the territory-wide means
    pub fn is_domain_wide(&self) -> bool {
        self.location == DOMAIN_LOCATION
    }

    /// Name shown in titles
    pub fn location_label(&self) -> &str {
        if self.is_domain_wide() {
            DOMAIN_LABEL
        } else {
            &self.location
        }
    }

    /// Months the filter should keep
    pub fn effective_months(&self) -> BTreeSet<Month> {
        if self.all_months {
            Month::all().collect()
        } else {
            self.months.clone()
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            scenarios: vec!["rcp60".to_string(), "rcp85".to_string()],
            models: vec!["NCAR-CCSM4".to_string()],
            variable: Variable::Tas,
            months: [12, 1, 2].into_iter().filter_map(Month::new).collect(),
            all_months: false,
            years: YearRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_months_all() {
        let selection = Selection {
            all_months: true,
            ..Selection::default()
        };
        assert_eq!(selection.effective_months().len(), 12);
    }

    #[test]
    fn test_effective_months_explicit() {
        let selection = Selection::default();
        let numbers: Vec<u8> = selection
            .effective_months()
            .into_iter()
            .map(Month::number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 12]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let selection: Selection =
            serde_json::from_str(r#"{"location": "Inuvik", "months": [6, 7]}"#).unwrap();
        assert_eq!(selection.location, "Inuvik");
        assert_eq!(selection.models, vec!["NCAR-CCSM4"]);
        assert_eq!(selection.months.len(), 2);
        assert_eq!(selection.years, YearRange::new(2000, 2300));
    }

    #[test]
    fn test_domain_wide_label() {
        let selection = Selection {
            location: DOMAIN_LOCATION.to_string(),
            ..Selection::default()
        };
        assert!(selection.is_domain_wide());
        assert_eq!(selection.location_label(), "Northwest Territories");
        assert_eq!(Selection::default().location_label(), "Yellowknife");
    }

    #[test]
    fn test_json_rejects_bad_month() {
        let result: Result<Selection, _> = serde_json::from_str(r#"{"months": [13]}"#);
        assert!(result.is_err());
    }
}
