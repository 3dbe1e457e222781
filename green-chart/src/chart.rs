//! Renderer-neutral chart descriptions.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend. Field names are camelCase on the wire.

use serde::Serialize;

/// The chart family a description belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Filled density curves, value on the vertical axis.
    Density,
    /// Points on a categorical horizontal axis.
    Scatter,
}

/// A complete faceted chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    /// One panel per facet value, in display order.
    pub facets: Vec<Facet>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Option<Legend>,
    /// Whether every facet uses the same horizontal scale.
    pub share_x: bool,
    /// Whether every facet uses the same vertical scale.
    pub share_y: bool,
    /// Number of observations that survived filtering.
    pub observations: usize,
}

impl Chart {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A single panel of a faceted chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    pub title: String,
    /// Category order of the horizontal axis; empty for continuous axes.
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

/// Marks drawn inside a facet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Series {
    Density(DensitySeries),
    Points(PointSeries),
}

/// One estimated density curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensitySeries {
    /// Group name; `None` when the chart is not grouped.
    pub name: Option<String>,
    pub color: String,
    pub fill_opacity: f64,
    /// Observations the curve was estimated from.
    pub sample_size: usize,
    pub points: Vec<DensityPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub value: f64,
    pub density: f64,
}

/// Scatter points of one facet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSeries {
    pub size: f64,
    pub outline_width: f64,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub category: String,
    pub value: f64,
    pub year: i32,
    pub color: String,
}

/// How an axis maps data to position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisScale {
    Linear,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub title: String,
    pub scale: AxisScale,
    /// Fixed (min, max); `None` lets each facet use its own categories.
    pub domain: Option<(f64, f64)>,
    /// Explicit tick positions; `None` leaves ticks to the renderer.
    pub ticks: Option<Vec<f64>>,
    /// Tick label rotation in degrees.
    pub tick_rotation: i32,
}

/// Fixed corner placement for a legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendPosition {
    LowerLeft,
    LowerRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub title: String,
    pub position: LegendPosition,
    pub framed: bool,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}
