//! Typed series retrieval on top of the source collaborator.

use std::sync::Arc;

use chrono::NaiveDate;
use fred_ingestor::{
    models::series::{SeriesData, SeriesInfo},
    providers::SeriesSource,
};
use thiserror::Error;
use tracing::info;

/// Fetch bounds derived from a time-period expression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// A time-period expression that cannot be turned into fetch bounds.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed time period expression: '{0}'")]
pub struct DateWindowError(pub String);

fn parse_year(token: &str) -> Option<i32> {
    if token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// One side of a window: a bare year maps to its January 1st, anything else
/// must be a literal ISO date.
fn parse_date_token(token: &str, expr: &str) -> Result<NaiveDate, DateWindowError> {
    if let Some(year) = parse_year(token) {
        return NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| DateWindowError(expr.to_string()));
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d").map_err(|_| DateWindowError(expr.to_string()))
}

/// Derives a start/end window from the primary time-period expression.
///
/// "latest" (or no expression) means an unbounded fetch; a bare 4-digit year
/// expands to Jan 1–Dec 31 of that year; an "A to B" expression splits on
/// " to "; anything else is treated as a literal start date and fails with
/// [`DateWindowError`] when it is not one.
pub fn date_window(primary: Option<&str>) -> Result<DateWindow, DateWindowError> {
    let Some(expr) = primary else {
        return Ok(DateWindow::default());
    };
    if expr == "latest" {
        return Ok(DateWindow::default());
    }

    if let Some((start_token, end_token)) = expr.split_once(" to ") {
        return Ok(DateWindow {
            start: Some(parse_date_token(start_token.trim(), expr)?),
            end: Some(parse_date_token(end_token.trim(), expr)?),
        });
    }

    if let Some(year) = parse_year(expr) {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        if start.is_none() || end.is_none() {
            return Err(DateWindowError(expr.to_string()));
        }
        return Ok(DateWindow { start, end });
    }

    Ok(DateWindow {
        start: Some(parse_date_token(expr, expr)?),
        end: None,
    })
}

/// Assembles complete [`SeriesData`] values from the raw source calls.
pub struct SeriesFetcher {
    source: Arc<dyn SeriesSource>,
}

impl SeriesFetcher {
    pub fn new(source: Arc<dyn SeriesSource>) -> Self {
        Self { source }
    }

    pub async fn search(&self, text: &str, limit: usize) -> Vec<SeriesInfo> {
        info!(text, limit, "searching series");
        self.source.search_series(text, limit).await
    }

    /// Metadata plus observations for one series id.
    ///
    /// `None` when the id is unknown to the source; an empty observation
    /// list is returned as a series with no data, so the caller can report
    /// "found but empty" separately from "not found".
    pub async fn series_data(&self, series_id: &str, window: DateWindow) -> Option<SeriesData> {
        info!(series_id, ?window, "fetching series");
        let info = self.source.series_info(series_id).await?;
        let data = self
            .source
            .observations(series_id, window.start, window.end)
            .await;
        Some(SeriesData {
            series_id: series_id.to_string(),
            info,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn latest_and_absent_mean_unbounded() {
        assert_eq!(date_window(None).unwrap(), DateWindow::default());
        assert_eq!(date_window(Some("latest")).unwrap(), DateWindow::default());
    }

    #[test]
    fn bare_year_expands_to_full_year() {
        let window = date_window(Some("2021")).unwrap();
        assert_eq!(window.start, Some(date(2021, 1, 1)));
        assert_eq!(window.end, Some(date(2021, 12, 31)));
    }

    #[test]
    fn range_splits_on_to() {
        let window = date_window(Some("2020 to 2023")).unwrap();
        assert_eq!(window.start, Some(date(2020, 1, 1)));
        assert_eq!(window.end, Some(date(2023, 1, 1)));
    }

    #[test]
    fn literal_iso_date_is_a_start_bound() {
        let window = date_window(Some("2022-06-15")).unwrap();
        assert_eq!(window.start, Some(date(2022, 6, 15)));
        assert_eq!(window.end, None);
    }

    #[test]
    fn relative_expressions_are_malformed_windows() {
        let err = date_window(Some("last 5 years")).unwrap_err();
        assert!(err.to_string().contains("last 5 years"));
    }
}
