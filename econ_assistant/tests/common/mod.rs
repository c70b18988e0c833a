#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use fred_ingestor::{
    models::series::{DataPoint, SeriesData, SeriesInfo},
    providers::SeriesSource,
};

/// In-memory [`SeriesSource`] with canned series and search results.
///
/// Search hits match their configured term exactly; `observations` honors
/// the requested date window like a real vendor would.
#[derive(Default)]
pub struct MockSource {
    series: Vec<SeriesData>,
    search_hits: Vec<(String, Vec<SeriesInfo>)>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: SeriesData) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_search_hit(mut self, term: &str, results: Vec<SeriesInfo>) -> Self {
        self.search_hits.push((term.to_string(), results));
        self
    }
}

#[async_trait]
impl SeriesSource for MockSource {
    async fn search_series(&self, text: &str, limit: usize) -> Vec<SeriesInfo> {
        self.search_hits
            .iter()
            .find(|(term, _)| term == text)
            .map(|(_, results)| results.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    async fn series_info(&self, series_id: &str) -> Option<SeriesInfo> {
        self.series
            .iter()
            .find(|s| s.series_id == series_id)
            .map(|s| s.info.clone())
    }

    async fn observations(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<DataPoint> {
        self.series
            .iter()
            .find(|s| s.series_id == series_id)
            .map(|s| {
                s.data
                    .iter()
                    .filter(|p| start.is_none_or(|b| p.date >= b))
                    .filter(|p| end.is_none_or(|b| p.date <= b))
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn info(id: &str, title: &str, units: &str) -> SeriesInfo {
    SeriesInfo {
        id: id.to_string(),
        title: title.to_string(),
        units: units.to_string(),
        frequency: Some("Quarterly".to_string()),
        seasonal_adjustment: None,
        seasonal_adjustment_short: None,
        notes: None,
        popularity: Some(80),
        observation_start: None,
        observation_end: None,
        last_updated: None,
    }
}

pub fn series(id: &str, title: &str, units: &str, points: &[(&str, f64)]) -> SeriesData {
    SeriesData {
        series_id: id.to_string(),
        info: info(id, title, units),
        data: points
            .iter()
            .map(|(d, v)| DataPoint::new(date(d), Some(*v)))
            .collect(),
    }
}
