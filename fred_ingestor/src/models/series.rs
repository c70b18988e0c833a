//! Canonical in-memory representation of an economic time series.
//!
//! These structs are the standard output of every [`SeriesSource`](crate::providers::SeriesSource)
//! implementation, regardless of the upstream vendor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable metadata snapshot for one series.
///
/// Created by the fetch collaborator; read-only downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Opaque series identifier (e.g. "GDP", "UNRATE").
    pub id: String,

    /// Human-readable series title.
    pub title: String,

    /// Measurement units as reported by the vendor (e.g. "Billions of Dollars").
    pub units: String,

    /// Observation frequency (e.g. "Quarterly"). Not all vendors supply this.
    pub frequency: Option<String>,

    /// Seasonal adjustment description.
    pub seasonal_adjustment: Option<String>,

    /// Abbreviated seasonal adjustment tag (e.g. "SA", "NSA").
    pub seasonal_adjustment_short: Option<String>,

    /// Free-form vendor notes.
    pub notes: Option<String>,

    /// Vendor popularity rank, when available.
    pub popularity: Option<i64>,

    /// First date with observations.
    pub observation_start: Option<NaiveDate>,

    /// Last date with observations.
    pub observation_end: Option<NaiveDate>,

    /// Vendor timestamp of the last metadata update.
    pub last_updated: Option<String>,
}

/// A single dated observation.
///
/// `value` is `None` when the series has no observation for that date.
/// Providers drop unparseable/missing observations before constructing
/// points, but downstream transforms may reintroduce absent values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// A complete fetched series: identifier, metadata, and ordered observations.
///
/// Invariant: `data` is sorted ascending by date with no duplicate dates.
/// Constructed once per fetch and immutable afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesData {
    pub series_id: String,
    pub info: SeriesInfo,
    pub data: Vec<DataPoint>,
}
