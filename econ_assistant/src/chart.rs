//! Chart specification handed to the rendering collaborator.
//!
//! The core only assembles a [`ChartSpec`] and optionally hands it to a
//! [`ChartRenderer`]; it never inspects the rendered artifact.

use std::fmt;

use thiserror::Error;

use crate::models::ProcessedDataset;

/// The chart shapes the classifier can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    ComparisonBar,
    SnapshotValue,
    Generic,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Line => "line_chart",
            ChartKind::ComparisonBar => "comparison_bar_chart",
            ChartKind::SnapshotValue => "snapshot_value_display",
            ChartKind::Generic => "generic_chart",
        };
        write!(f, "{name}")
    }
}

/// Rendering options forwarded verbatim to the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    /// Shade recession periods behind the series.
    pub recession_shading: bool,
    /// Show the default data-source caption.
    pub source_caption: bool,
    /// Whether the plotted data was normalized to an index.
    pub normalized: bool,
}

/// Everything the rendering collaborator needs for one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Ids of the datasets in the response to render.
    pub dataset_ids: Vec<String>,
    pub x_axis_label: Option<String>,
    pub y_axis_label: String,
    pub options: ChartOptions,
}

#[derive(Debug, Error)]
#[error("chart rendering failed: {0}")]
pub struct RenderError(pub String);

/// External chart-rendering collaborator.
pub trait ChartRenderer: Send + Sync {
    /// Renders the spec against the given datasets. The artifact stays on
    /// the renderer's side; the caller only records success or failure.
    fn render(&self, spec: &ChartSpec, datasets: &[ProcessedDataset]) -> Result<(), RenderError>;
}
