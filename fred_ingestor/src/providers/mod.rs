//! Source abstraction for economic series vendors.
//!
//! This module defines the [`SeriesSource`] trait, a unified interface for
//! searching series metadata and fetching observations from any vendor
//! (FRED today, others later).
//!
//! The contract is deliberately lenient: upstream failures degrade to empty
//! results rather than errors, so a consumer can always continue with the
//! sibling series it did manage to fetch. Implementations are expected to
//! log the underlying failure before degrading.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`Arc<dyn SeriesSource>`) so consumers can swap vendors at runtime.

pub mod errors;
pub mod fred_rest;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::series::{DataPoint, SeriesInfo};

#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Full-text search over series metadata, ranked by the vendor.
    ///
    /// Returns an empty list on no match or upstream failure.
    async fn search_series(&self, text: &str, limit: usize) -> Vec<SeriesInfo>;

    /// Metadata for one series id. `None` on unknown id or upstream failure.
    async fn series_info(&self, series_id: &str) -> Option<SeriesInfo>;

    /// Ordered observations for one series id, optionally bounded by date.
    ///
    /// Points with missing or unparseable values are dropped, not returned
    /// as absent values. Empty on no data in range or upstream failure.
    async fn observations(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<DataPoint>;
}
