//! Presentation stage: location map overlay

use serde::{Deserialize, Serialize};

use crate::models::{Location, MapCenter, MapFigure, MapLayout, MapTrace, Mapbox, Margin, Marker};

const PLACE_MARKER_SIZE: u32 = 10;
const PLACE_MARKER_COLOR: &str = "rgb(80,80,80)";
const SELECTED_MARKER_SIZE: u32 = 20;
const SELECTED_MARKER_COLOR: &str = "rgb(207, 38, 47)";

/// Base map appearance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapSettings {
    pub style: String,
    pub zoom: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    /// Tile provider token, passed through to the client when set
    pub access_token: Option<String>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            style: "carto-positron".to_string(),
            zoom: 3.25,
            center_lat: 66.75,
            center_lon: -125.0,
            access_token: None,
        }
    }
}

fn marker_trace<'a>(locations: impl IntoIterator<Item = &'a Location>, size: u32, color: &str) -> MapTrace {
    let mut lat = Vec::new();
    let mut lon = Vec::new();
    let mut text = Vec::new();
    for location in locations {
        if let Some((la, lo)) = location.coordinates.to_f64_pair() {
            lat.push(la);
            lon.push(lo);
            text.push(location.name.clone());
        }
    }

    MapTrace {
        trace_type: "scattermapbox".to_string(),
        lat,
        lon,
        text,
        mode: "markers".to_string(),
        marker: Marker {
            size,
            color: color.to_string(),
        },
        hoverinfo: "text".to_string(),
    }
}

/// Map with every location as a marker and `selected` highlighted.
///
/// An unknown or missing selection draws no highlight.
pub fn build_map(locations: &[Location], selected: Option<&str>, settings: &MapSettings) -> MapFigure {
    let mut data = vec![marker_trace(locations, PLACE_MARKER_SIZE, PLACE_MARKER_COLOR)];

    if let Some(location) = selected.and_then(|name| locations.iter().find(|l| l.name == name)) {
        data.push(marker_trace([location], SELECTED_MARKER_SIZE, SELECTED_MARKER_COLOR));
    }

    MapFigure {
        data,
        layout: MapLayout {
            autosize: true,
            hovermode: "closest".to_string(),
            mapbox: Mapbox {
                style: settings.style.clone(),
                zoom: settings.zoom,
                center: MapCenter {
                    lat: settings.center_lat,
                    lon: settings.center_lon,
                },
                accesstoken: settings.access_token.clone(),
            },
            showlegend: false,
            margin: Margin::default(),
        },
    }
}
