use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::series::{DataPoint, SeriesInfo};

/// One series record as returned by `/fred/series` and `/fred/series/search`.
#[derive(Deserialize, Debug)]
pub(crate) struct FredSeriesRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub seasonal_adjustment: Option<String>,
    #[serde(default)]
    pub seasonal_adjustment_short: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub observation_start: Option<NaiveDate>,
    #[serde(default)]
    pub observation_end: Option<NaiveDate>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl From<FredSeriesRecord> for SeriesInfo {
    fn from(record: FredSeriesRecord) -> Self {
        SeriesInfo {
            id: record.id,
            title: record.title,
            units: record.units.unwrap_or_else(|| "N/A".to_string()),
            frequency: record.frequency,
            seasonal_adjustment: record.seasonal_adjustment,
            seasonal_adjustment_short: record.seasonal_adjustment_short,
            notes: record.notes,
            popularity: record.popularity,
            observation_start: record.observation_start,
            observation_end: record.observation_end,
            last_updated: record.last_updated,
        }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct FredSeriesList {
    pub seriess: Vec<FredSeriesRecord>,
}

/// One observation row. FRED encodes values as strings, with "." for a
/// missing observation.
#[derive(Deserialize, Debug)]
pub(crate) struct FredObservation {
    pub date: NaiveDate,
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct FredObservationList {
    pub observations: Vec<FredObservation>,
}

/// Converts raw observation rows to typed points, dropping rows whose value
/// is missing or unparseable rather than representing them as absent.
pub(crate) fn to_data_points(observations: Vec<FredObservation>) -> Vec<DataPoint> {
    observations
        .into_iter()
        .filter_map(|obs| {
            let value: f64 = obs.value.trim().parse().ok()?;
            if value.is_nan() {
                return None;
            }
            Some(DataPoint::new(obs.date, Some(value)))
        })
        .collect()
}
