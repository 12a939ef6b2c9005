//! Common types used across the explorer

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coordinates as `(lat, lon)` floats for plotting
    pub fn to_f64_pair(&self) -> Option<(f64, f64)> {
        Some((self.latitude.to_f64()?, self.longitude.to_f64()?))
    }
}

/// Inclusive range of decade years
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// An inverted range selects nothing
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: 2000,
            end: 2300,
        }
    }
}

/// Value/label pair used to populate UI controls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}
