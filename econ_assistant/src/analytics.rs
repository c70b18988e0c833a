//! Growth statistics and index normalization over fetched series.
//!
//! All operations skip absent-value points when locating the first/last
//! valid observation, and every degenerate input (zero base, zero-length
//! span, sign-flipped endpoints) maps to a typed outcome instead of a
//! sentinel float or a panic.

use std::fmt;

use fred_ingestor::models::series::{DataPoint, SeriesData};
use thiserror::Error;

use crate::models::{DatasetMeta, NormalizeStatus, ProcessedDataset};

/// A growth rate that may be unbounded (zero-valued start point).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrowthValue {
    /// Ordinary percentage.
    Percent(f64),
    /// Start value was zero and the end value is positive.
    PositiveInfinite,
    /// Start value was zero and the end value is negative.
    NegativeInfinite,
}

impl GrowthValue {
    fn from_end_sign(end_value: f64) -> Self {
        if end_value > 0.0 {
            GrowthValue::PositiveInfinite
        } else if end_value < 0.0 {
            GrowthValue::NegativeInfinite
        } else {
            GrowthValue::Percent(0.0)
        }
    }
}

impl fmt::Display for GrowthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthValue::Percent(p) => write!(f, "{p:.2}%"),
            GrowthValue::PositiveInfinite => write!(f, "unbounded (+)"),
            GrowthValue::NegativeInfinite => write!(f, "unbounded (-)"),
        }
    }
}

/// Total growth between the first and last valid observation.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthMetric {
    pub value: GrowthValue,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub start_value: f64,
    pub end_value: f64,
    /// Explains a degenerate-case interpretation, when one applies.
    pub note: Option<String>,
}

/// Compound annual growth rate between the first and last valid observation.
#[derive(Clone, Debug, PartialEq)]
pub struct CagrMetric {
    pub value: GrowthValue,
    /// Elapsed years, rounded to two decimals; clamped to 0 when the span
    /// is non-positive and the start value is zero.
    pub years: f64,
    pub note: Option<String>,
}

/// Why a growth statistic could not be produced.
#[derive(Debug, Error, PartialEq)]
pub enum GrowthError {
    /// Fewer than two distinct-dated valid observations.
    #[error("fewer than two distinct valid observations")]
    InsufficientData,

    /// Sign-flipped endpoints with a fractional exponent: a negative ratio
    /// raised to a non-integer power has no real value.
    #[error("growth ratio {ratio} is negative and 1/{years} years is not an integer exponent")]
    UndefinedExponent { ratio: f64, years: f64 },
}

fn first_valid(points: &[DataPoint]) -> Option<&DataPoint> {
    points.iter().find(|p| p.value.is_some())
}

fn last_valid(points: &[DataPoint]) -> Option<&DataPoint> {
    points.iter().rev().find(|p| p.value.is_some())
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Rescales a series to an index with the given base at its first valid
/// observation.
///
/// Returns a dataset whose metadata status reports the outcome: an empty
/// series or a missing/zero base value fails softly (original points are
/// passed through unchanged in the latter case), and division by zero is
/// never attempted.
pub fn normalize(series: &SeriesData, base: f64) -> ProcessedDataset {
    if series.data.is_empty() {
        return ProcessedDataset {
            id: format!("{}_normalized_empty", series.series_id),
            name: format!("{} (Normalized - Empty)", series.info.title),
            points: Vec::new(),
            meta: DatasetMeta {
                source_id: series.series_id.clone(),
                original_units: Some(series.info.units.clone()),
                status: NormalizeStatus::EmptySeries,
                ..DatasetMeta::default()
            },
        };
    }

    let base_point = match first_valid(&series.data) {
        Some(point) if point.value != Some(0.0) => point,
        _ => {
            return ProcessedDataset {
                id: format!("{}_normalization_failed", series.series_id),
                name: format!("{} (Normalization Failed)", series.info.title),
                points: series.data.clone(),
                meta: DatasetMeta {
                    source_id: series.series_id.clone(),
                    original_units: Some(series.info.units.clone()),
                    status: NormalizeStatus::Failed,
                    ..DatasetMeta::default()
                },
            };
        }
    };

    let base_value = base_point.value.unwrap_or(0.0);
    let base_date = base_point.date;

    let points = series
        .data
        .iter()
        .map(|p| DataPoint::new(p.date, p.value.map(|v| v / base_value * base)))
        .collect();

    ProcessedDataset {
        id: format!("{}_normalized", series.series_id),
        name: format!(
            "{} (Normalized to {base} at {base_date})",
            series.info.title
        ),
        points,
        meta: DatasetMeta {
            source_id: series.series_id.clone(),
            original_units: Some(series.info.units.clone()),
            normalized_units: Some(format!("Index (Base {base} = {base_date})")),
            base_value: Some(base_value),
            base_date: Some(base_date),
            status: NormalizeStatus::Success,
        },
    }
}

/// Total growth percentage between the first and last valid observation.
pub fn total_growth(points: &[DataPoint]) -> Result<GrowthMetric, GrowthError> {
    let (first, last) = match (first_valid(points), last_valid(points)) {
        (Some(first), Some(last)) if first.date != last.date => (first, last),
        _ => return Err(GrowthError::InsufficientData),
    };

    let start_value = first.value.ok_or(GrowthError::InsufficientData)?;
    let end_value = last.value.ok_or(GrowthError::InsufficientData)?;

    if start_value == 0.0 {
        return Ok(GrowthMetric {
            value: GrowthValue::from_end_sign(end_value),
            start_date: first.date,
            end_date: last.date,
            start_value,
            end_value,
            note: Some("Start value is 0".to_string()),
        });
    }

    Ok(GrowthMetric {
        value: GrowthValue::Percent(((end_value / start_value) - 1.0) * 100.0),
        start_date: first.date,
        end_date: last.date,
        start_value,
        end_value,
        note: None,
    })
}

/// Compound annual growth rate between the first and last valid observation.
///
/// Elapsed years are measured as calendar days / 365.25. A sign-flipped
/// ratio is refused unless the reciprocal of the elapsed years is an
/// integer, in which case the power is computed with real integer-exponent
/// arithmetic.
pub fn cagr(points: &[DataPoint]) -> Result<CagrMetric, GrowthError> {
    let (first, last) = match (first_valid(points), last_valid(points)) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(GrowthError::InsufficientData),
    };

    let start_value = first.value.ok_or(GrowthError::InsufficientData)?;
    let end_value = last.value.ok_or(GrowthError::InsufficientData)?;

    let years = (last.date - first.date).num_days() as f64 / 365.25;

    if start_value == 0.0 {
        return Ok(CagrMetric {
            value: GrowthValue::from_end_sign(end_value),
            years: if years > 0.0 { round2(years) } else { 0.0 },
            note: Some("Start value is 0".to_string()),
        });
    }

    if years <= 0.0 {
        if start_value == end_value {
            return Ok(CagrMetric {
                value: GrowthValue::Percent(0.0),
                years: round2(years),
                note: Some("Zero or negative duration, same start and end value".to_string()),
            });
        }
        let value = if end_value > start_value {
            GrowthValue::PositiveInfinite
        } else {
            GrowthValue::NegativeInfinite
        };
        return Ok(CagrMetric {
            value,
            years: round2(years),
            note: Some("Zero or negative duration, different start and end values".to_string()),
        });
    }

    let ratio = end_value / start_value;
    let rate = if ratio < 0.0 {
        let exponent = 1.0 / years;
        if exponent.fract() != 0.0 {
            return Err(GrowthError::UndefinedExponent { ratio, years });
        }
        ratio.powi(exponent as i32)
    } else {
        ratio.powf(1.0 / years)
    };

    Ok(CagrMetric {
        value: GrowthValue::Percent((rate - 1.0) * 100.0),
        years: round2(years),
        note: None,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fred_ingestor::models::series::SeriesInfo;
    use proptest::prelude::*;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn info(id: &str) -> SeriesInfo {
        SeriesInfo {
            id: id.to_string(),
            title: format!("{id} title"),
            units: "Billions of Dollars".to_string(),
            frequency: Some("Quarterly".to_string()),
            seasonal_adjustment: None,
            seasonal_adjustment_short: None,
            notes: None,
            popularity: None,
            observation_start: None,
            observation_end: None,
            last_updated: None,
        }
    }

    fn series(id: &str, points: &[(NaiveDate, Option<f64>)]) -> SeriesData {
        SeriesData {
            series_id: id.to_string(),
            info: info(id),
            data: points
                .iter()
                .map(|(d, v)| DataPoint::new(*d, *v))
                .collect(),
        }
    }

    #[test]
    fn normalize_rescales_to_base_100() {
        let s = series(
            "GDP",
            &[
                (date(2022, 1, 1), Some(100.0)),
                (date(2022, 4, 1), Some(150.0)),
                (date(2022, 7, 1), Some(50.0)),
            ],
        );
        let out = normalize(&s, 100.0);
        assert_eq!(out.meta.status, NormalizeStatus::Success);
        assert_eq!(out.id, "GDP_normalized");
        assert_eq!(out.points[0].value, Some(100.0));
        assert_eq!(out.points[1].value, Some(150.0));
        assert_eq!(out.points[2].value, Some(50.0));
        assert_eq!(
            out.meta.normalized_units.as_deref(),
            Some("Index (Base 100 = 2022-01-01)")
        );
        assert_eq!(out.meta.base_value, Some(100.0));
    }

    #[test]
    fn normalize_skips_leading_absent_values_for_base() {
        let s = series(
            "GDP",
            &[
                (date(2022, 1, 1), None),
                (date(2022, 4, 1), Some(102.0)),
                (date(2022, 7, 1), Some(51.0)),
            ],
        );
        let out = normalize(&s, 100.0);
        assert_eq!(out.meta.status, NormalizeStatus::Success);
        assert_eq!(out.meta.base_date, Some(date(2022, 4, 1)));
        assert_eq!(out.points[0].value, None);
        assert_eq!(out.points[1].value, Some(100.0));
        assert_eq!(out.points[2].value, Some(50.0));
    }

    #[test]
    fn normalize_refuses_zero_base_and_keeps_originals() {
        let s = series(
            "Z",
            &[(date(2022, 1, 1), Some(0.0)), (date(2022, 4, 1), Some(10.0))],
        );
        let out = normalize(&s, 100.0);
        assert_eq!(out.meta.status, NormalizeStatus::Failed);
        assert_eq!(out.points, s.data);
        assert!(out.meta.normalized_units.is_none());
    }

    #[test]
    fn normalize_reports_empty_and_all_absent_series() {
        let empty = normalize(&series("E", &[]), 100.0);
        assert_eq!(empty.meta.status, NormalizeStatus::EmptySeries);

        let absent = normalize(
            &series("A", &[(date(2022, 1, 1), None), (date(2022, 4, 1), None)]),
            100.0,
        );
        assert_eq!(absent.meta.status, NormalizeStatus::Failed);
    }

    #[test]
    fn total_growth_simple_case() {
        let s = series(
            "G",
            &[
                (date(2020, 1, 1), Some(100.0)),
                (date(2021, 1, 1), Some(110.0)),
            ],
        );
        let metric = total_growth(&s.data).unwrap();
        match metric.value {
            GrowthValue::Percent(p) => assert!((p - 10.0).abs() < 1e-9, "got {p}"),
            other => panic!("expected percent, got {other:?}"),
        }
        assert_eq!(metric.start_date, date(2020, 1, 1));
        assert!(metric.note.is_none());
    }

    #[test]
    fn total_growth_requires_distinct_dates() {
        let s = series(
            "G",
            &[
                (date(2020, 1, 1), Some(100.0)),
                (date(2020, 1, 1), Some(100.0)),
            ],
        );
        assert_eq!(total_growth(&s.data), Err(GrowthError::InsufficientData));
        assert_eq!(total_growth(&[]), Err(GrowthError::InsufficientData));
    }

    #[test]
    fn total_growth_zero_start_follows_end_sign() {
        let up = series(
            "G",
            &[(date(2020, 1, 1), Some(0.0)), (date(2021, 1, 1), Some(5.0))],
        );
        let metric = total_growth(&up.data).unwrap();
        assert_eq!(metric.value, GrowthValue::PositiveInfinite);
        assert_eq!(metric.note.as_deref(), Some("Start value is 0"));

        let down = series(
            "G",
            &[(date(2020, 1, 1), Some(0.0)), (date(2021, 1, 1), Some(-5.0))],
        );
        assert_eq!(
            total_growth(&down.data).unwrap().value,
            GrowthValue::NegativeInfinite
        );

        let flat = series(
            "G",
            &[(date(2020, 1, 1), Some(0.0)), (date(2021, 1, 1), Some(0.0))],
        );
        assert_eq!(
            total_growth(&flat.data).unwrap().value,
            GrowthValue::Percent(0.0)
        );
    }

    #[test]
    fn cagr_three_year_ten_percent() {
        // 1.1^3 = 1.331 over three years.
        let s = series(
            "C",
            &[
                (date(2020, 1, 1), Some(100.0)),
                (date(2023, 1, 1), Some(133.1)),
            ],
        );
        let metric = cagr(&s.data).unwrap();
        match metric.value {
            GrowthValue::Percent(p) => assert!((p - 10.0).abs() < 0.1, "got {p}"),
            other => panic!("expected percent, got {other:?}"),
        }
        assert!((metric.years - 3.0).abs() < 0.01);
    }

    #[test]
    fn cagr_negative_to_negative_has_positive_ratio() {
        // -121 / -100 = 1.21, sqrt over ~2 years -> ~10%.
        let s = series(
            "C",
            &[
                (date(2020, 1, 1), Some(-100.0)),
                (date(2022, 1, 1), Some(-121.0)),
            ],
        );
        let metric = cagr(&s.data).unwrap();
        match metric.value {
            GrowthValue::Percent(p) => assert!((p - 10.0).abs() < 0.1, "got {p}"),
            other => panic!("expected percent, got {other:?}"),
        }
    }

    #[test]
    fn cagr_sign_flip_with_fractional_exponent_is_refused() {
        // 121 / -100 = -1.21 and 1/2 years is not an integer exponent.
        let s = series(
            "C",
            &[
                (date(2020, 1, 1), Some(-100.0)),
                (date(2022, 1, 1), Some(121.0)),
            ],
        );
        assert!(matches!(
            cagr(&s.data),
            Err(GrowthError::UndefinedExponent { .. })
        ));

        // Same refusal over 1.5 years.
        let s = series(
            "C",
            &[
                (date(2020, 1, 1), Some(-100.0)),
                (date(2021, 6, 1), Some(50.0)),
            ],
        );
        assert!(matches!(
            cagr(&s.data),
            Err(GrowthError::UndefinedExponent { .. })
        ));
    }

    #[test]
    fn cagr_sign_flip_over_half_a_year_is_still_refused() {
        // 183 days / 365.25 = 0.501..., so 1/years stays fractional even
        // near the half-year mark.
        let points = [
            DataPoint::new(date(2020, 1, 1), Some(-100.0)),
            DataPoint::new(date(2020, 7, 2), Some(121.0)),
        ];
        assert!(matches!(
            cagr(&points),
            Err(GrowthError::UndefinedExponent { .. })
        ));
    }

    #[test]
    fn cagr_zero_start_reports_sign_with_years() {
        let s = series(
            "C",
            &[(date(2020, 1, 1), Some(0.0)), (date(2021, 1, 1), Some(5.0))],
        );
        let metric = cagr(&s.data).unwrap();
        assert_eq!(metric.value, GrowthValue::PositiveInfinite);
        assert!(metric.years > 0.0);
        assert_eq!(metric.note.as_deref(), Some("Start value is 0"));
    }

    #[test]
    fn cagr_zero_duration_same_value_is_zero_with_note() {
        let s = series(
            "C",
            &[
                (date(2020, 1, 1), Some(100.0)),
                (date(2020, 1, 1), Some(100.0)),
            ],
        );
        let metric = cagr(&s.data).unwrap();
        assert_eq!(metric.value, GrowthValue::Percent(0.0));
        assert_eq!(metric.years, 0.0);
        assert!(metric.note.is_some());

        let s = series(
            "C",
            &[
                (date(2020, 1, 1), Some(100.0)),
                (date(2020, 1, 1), Some(150.0)),
            ],
        );
        assert_eq!(
            cagr(&s.data).unwrap().value,
            GrowthValue::PositiveInfinite
        );
    }

    #[test]
    fn cagr_needs_valid_points() {
        assert_eq!(cagr(&[]), Err(GrowthError::InsufficientData));
        let all_absent = [
            DataPoint::new(date(2020, 1, 1), None),
            DataPoint::new(date(2021, 1, 1), None),
        ];
        assert_eq!(cagr(&all_absent), Err(GrowthError::InsufficientData));
    }

    proptest! {
        // Whenever normalization succeeds, the base-date value is exactly
        // the base (within floating tolerance).
        #[test]
        fn normalized_base_point_is_base(
            base_value in (-1e12f64..1e12).prop_filter("not near zero", |v| v.abs() > 1e-6),
            tail in prop::collection::vec(-1e12f64..1e12, 0..8),
        ) {
            let mut points = vec![(date(2020, 1, 1), Some(base_value))];
            for (i, v) in tail.iter().enumerate() {
                points.push((date(2020, 1, 2) + chrono::Days::new(i as u64), Some(*v)));
            }
            let s = series("P", &points);
            let out = normalize(&s, 100.0);
            prop_assert_eq!(out.meta.status, NormalizeStatus::Success);
            let first = out.points[0].value.unwrap();
            prop_assert!((first - 100.0).abs() < 1e-9);
        }
    }
}
