//! Location models

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// A named point (community or mine site) used as a filter key and map marker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    pub coordinates: GpsCoordinates,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: GpsCoordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}
