//! Value objects passed between pipeline stages.
//!
//! Every type here is constructed once by the stage that produces it and is
//! immutable afterward; stages hand results to each other by value.

use std::fmt;

use chrono::NaiveDate;
use fred_ingestor::models::series::DataPoint;

use crate::chart::{ChartKind, ChartSpec};

/// The discrete query intents the classifier can assign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryType {
    SingleDatapoint,
    TrendOverTime,
    GeographicalComparison,
    IndicatorComparison,
    TimeComparison,
    ComparisonGeneric,
    SeriesSearch,
    DataRetrieval,
    Unknown,
}

impl QueryType {
    /// True for the comparison-family outcomes of the first classifier rule.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            QueryType::GeographicalComparison
                | QueryType::IndicatorComparison
                | QueryType::TimeComparison
                | QueryType::ComparisonGeneric
        )
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryType::SingleDatapoint => "single_datapoint",
            QueryType::TrendOverTime => "trend_over_time",
            QueryType::GeographicalComparison => "geographical_comparison",
            QueryType::IndicatorComparison => "indicator_comparison",
            QueryType::TimeComparison => "time_comparison",
            QueryType::ComparisonGeneric => "comparison_generic",
            QueryType::SeriesSearch => "series_search",
            QueryType::DataRetrieval => "data_retrieval",
            QueryType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Free-form parameter flags extracted alongside the query type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryFlags {
    /// Set when the text asks for normalized data ("normalize"/"normalized").
    pub normalize: bool,
}

/// Structured interpretation of one incoming query.
///
/// Entity lists are unique and keep first-seen (lexicon) order; the first
/// time-period entry is the primary one.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryDetails {
    pub raw_query: String,
    pub query_type: QueryType,
    pub indicators: Vec<String>,
    pub locations: Vec<String>,
    pub time_periods: Vec<String>,
    pub flags: QueryFlags,
    /// Chart kind the user asked for, if a visualization keyword was present.
    pub chart: Option<ChartKind>,
}

/// Whether and how a dataset was rescaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalizeStatus {
    /// Dataset carries the original observations.
    #[default]
    NotApplied,
    /// Dataset was rescaled to the index base.
    Success,
    /// Nothing to rescale: the source series had no points.
    EmptySeries,
    /// No valid base point, or the base value was zero; original points kept.
    Failed,
}

/// Provenance carried with every dataset.
///
/// Invariant: `status == Success` implies `base_value` is a present,
/// non-zero number and `base_date`/`normalized_units` are set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetMeta {
    pub source_id: String,
    pub original_units: Option<String>,
    pub normalized_units: Option<String>,
    pub base_value: Option<f64>,
    pub base_date: Option<NaiveDate>,
    pub status: NormalizeStatus,
}

/// A dataset prepared for presentation, possibly transformed.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedDataset {
    pub id: String,
    pub name: String,
    pub points: Vec<DataPoint>,
    pub meta: DatasetMeta,
}

/// Terminal output of one query-handling cycle.
///
/// Failures are encoded in `error_message`, never surfaced as an `Err` to
/// the caller; `summary` always carries a human-readable explanation.
#[derive(Clone, Debug)]
pub struct OrchestratorResponse {
    pub query: QueryDetails,
    pub datasets: Vec<ProcessedDataset>,
    pub summary: String,
    pub chart: Option<ChartSpec>,
    pub error_message: Option<String>,
}

impl OrchestratorResponse {
    pub(crate) fn text_only(query: QueryDetails, summary: impl Into<String>) -> Self {
        Self {
            query,
            datasets: Vec::new(),
            summary: summary.into(),
            chart: None,
            error_message: None,
        }
    }

    pub(crate) fn failure(
        query: QueryDetails,
        summary: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            query,
            datasets: Vec::new(),
            summary: summary.into(),
            chart: None,
            error_message: Some(error_message.into()),
        }
    }
}
