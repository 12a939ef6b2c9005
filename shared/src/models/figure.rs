//! Chart and map descriptions returned to the UI
//!
//! Field names follow the figure JSON understood by Plotly so a browser can
//! hand these to `Plotly.react` as they are.

use serde::{Deserialize, Serialize};

use crate::models::MonthKey;

/// Line chart: one series per model/scenario/month group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartFigure {
    pub data: Vec<LineSeries>,
    pub layout: ChartLayout,
}

impl ChartFigure {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One plotted line, x = year, y = value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub model: String,
    pub scenario: String,
    pub month: MonthKey,
    pub x: Vec<i32>,
    pub y: Vec<f64>,
    pub line: LineStyle,
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub width: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub autosize: bool,
    pub showlegend: bool,
    pub height: u32,
    pub margin: Margin,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

/// Free text placed relative to the plotting area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub xref: String,
    pub yref: String,
    pub showarrow: bool,
    pub text: String,
}

/// Location map: every place as a marker, the selected one highlighted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapFigure {
    pub data: Vec<MapTrace>,
    pub layout: MapLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub text: Vec<String>,
    pub mode: String,
    pub marker: Marker,
    pub hoverinfo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapLayout {
    pub autosize: bool,
    pub hovermode: String,
    pub mapbox: Mapbox,
    pub showlegend: bool,
    pub margin: Margin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mapbox {
    pub style: String,
    pub zoom: f64,
    pub center: MapCenter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accesstoken: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}
