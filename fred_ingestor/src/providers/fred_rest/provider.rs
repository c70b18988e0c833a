use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::{require_var, var_or};
use tracing::warn;

use crate::{
    models::series::{DataPoint, SeriesInfo},
    providers::{
        SeriesSource,
        errors::{ProviderError, ProviderInitError},
        fred_rest::{
            params::{clamp_limit, info_params, observation_params, search_params},
            response::{FredObservationList, FredSeriesList, to_data_points},
        },
    },
};

const BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// FRED REST client.
///
/// The fallible `fetch_*` methods expose the raw provider errors; the
/// [`SeriesSource`] impl wraps them and degrades every failure to an empty
/// result after logging, which is the contract consumers rely on.
pub struct FredProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl FredProvider {
    /// Creates a new FRED provider.
    ///
    /// Reads the API key from the `FRED_API_KEY` environment variable. The
    /// API base URL can be overridden with `FRED_API_BASE_URL`.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(require_var("FRED_API_KEY")?.into());
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_key,
            base_url: var_or("FRED_API_BASE_URL", BASE_URL),
        })
    }

    /// Overrides the API base URL (mainly for tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self.client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(message));
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn fetch_search(
        &self,
        text: &str,
        limit: usize,
    ) -> Result<Vec<SeriesInfo>, ProviderError> {
        let limit = clamp_limit(limit)?;
        let params = search_params(self.api_key.expose_secret(), text, limit);
        let list: FredSeriesList = self.get_json("series/search", params).await?;
        Ok(list.seriess.into_iter().map(SeriesInfo::from).collect())
    }

    pub async fn fetch_info(&self, series_id: &str) -> Result<Option<SeriesInfo>, ProviderError> {
        let params = info_params(self.api_key.expose_secret(), series_id);
        let list: FredSeriesList = self.get_json("series", params).await?;
        Ok(list.seriess.into_iter().next().map(SeriesInfo::from))
    }

    pub async fn fetch_observations(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<DataPoint>, ProviderError> {
        let params = observation_params(self.api_key.expose_secret(), series_id, start, end);
        let list: FredObservationList = self.get_json("series/observations", params).await?;
        Ok(to_data_points(list.observations))
    }
}

#[async_trait]
impl SeriesSource for FredProvider {
    async fn search_series(&self, text: &str, limit: usize) -> Vec<SeriesInfo> {
        match self.fetch_search(text, limit).await {
            Ok(found) => found,
            Err(err) => {
                warn!(%err, text, "series search failed, returning no results");
                vec![]
            }
        }
    }

    async fn series_info(&self, series_id: &str) -> Option<SeriesInfo> {
        match self.fetch_info(series_id).await {
            Ok(info) => info,
            Err(err) => {
                warn!(%err, series_id, "series info fetch failed");
                None
            }
        }
    }

    async fn observations(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<DataPoint> {
        match self.fetch_observations(series_id, start, end).await {
            Ok(points) => points,
            Err(err) => {
                warn!(%err, series_id, "observation fetch failed, returning no data");
                vec![]
            }
        }
    }
}
