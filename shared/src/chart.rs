//! Presentation stage: record sets to line charts

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;

use crate::lookup::{model_label, scenario_label, series_color};
use crate::models::{
    Annotation, Axis, ChartFigure, ChartLayout, ClimateRecord, LineSeries, LineStyle, Margin,
    MonthKey, Selection, Variable,
};
use crate::types::YearRange;

pub const CHART_HEIGHT: u32 = 650;
const LINE_WIDTH: u8 = 2;
/// Decimal places shown on the y axis
const DISPLAY_PRECISION: u32 = 1;

const CAVEAT: &str = "These plots are useful for examining possible trends over time, \
                      rather than for precisely predicting values.";
const CREDIT: &str = "Credit: Scenarios Network for Alaska + Arctic Planning, \
                      University of Alaska Fairbanks.";

/// Build the chart title.
///
/// `<br>` separates lines, as understood by the chart renderer.
pub fn build_plot_title(location: &str, selection: &Selection) -> String {
    let variable = selection.variable.label();
    let YearRange { start, end } = selection.years;

    if selection.all_months {
        return format!(
            "{}<br>Decadal Annual Mean {}, {}-{}",
            location, variable, start, end
        );
    }

    let mut title = format!(
        "{}<br>Decadal Monthly Mean {}, {}-{}",
        location, variable, start, end
    );

    let names: Vec<&str> = selection.months.iter().map(|m| m.name()).collect();
    if !names.is_empty() {
        title.push_str("<br>");
        title.push_str(&names.join(", "));
    }
    if names.len() > 1 {
        title.push_str(" Averaged");
    }
    title
}

/// Group records into one line per (model, scenario, month key).
///
/// Series are ordered by model, scenario and month key; points within a
/// series by year.
pub fn build_series(records: &[ClimateRecord]) -> Vec<LineSeries> {
    let mut groups: BTreeMap<(&str, &str, &MonthKey), Vec<(i32, f64)>> = BTreeMap::new();
    for record in records {
        let Some(value) = record.value.round_dp(DISPLAY_PRECISION).to_f64() else {
            continue;
        };
        groups
            .entry((record.model.as_str(), record.scenario.as_str(), &record.month))
            .or_default()
            .push((record.year, value));
    }

    groups
        .into_iter()
        .map(|((model, scenario, month), mut points)| {
            points.sort_by_key(|(year, _)| *year);
            let (x, y) = points.into_iter().unzip();
            LineSeries {
                name: format!("{} {}", model_label(model), scenario_label(scenario)),
                model: model.to_string(),
                scenario: scenario.to_string(),
                month: month.clone(),
                x,
                y,
                line: LineStyle {
                    color: series_color(model, scenario).to_string(),
                    width: LINE_WIDTH,
                },
                mode: "lines".to_string(),
            }
        })
        .collect()
}

fn footnote(y: f64, text: &str) -> Annotation {
    Annotation {
        x: 0.5,
        y,
        xref: "paper".to_string(),
        yref: "paper".to_string(),
        showarrow: false,
        text: text.to_string(),
    }
}

pub fn build_layout(title: String, variable: Variable) -> ChartLayout {
    ChartLayout {
        title,
        autosize: false,
        showlegend: true,
        height: CHART_HEIGHT,
        margin: Margin {
            t: 100,
            b: 130,
            ..Margin::default()
        },
        xaxis: Axis {
            title: "Year".to_string(),
        },
        yaxis: Axis {
            title: variable.units().to_string(),
        },
        annotations: vec![footnote(-0.20, CAVEAT), footnote(-0.24, CREDIT)],
    }
}

/// Full chart for an already filtered/aggregated record set.
///
/// An empty record set gives a chart with no series and the usual title.
pub fn build_chart(records: &[ClimateRecord], selection: &Selection, location: &str) -> ChartFigure {
    ChartFigure {
        data: build_series(records),
        layout: build_layout(build_plot_title(location, selection), selection.variable),
    }
}
