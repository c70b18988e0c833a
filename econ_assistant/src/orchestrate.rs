//! Sequencing of one query: classify, resolve, fetch, transform, respond.

use std::sync::Arc;

use fred_ingestor::{models::series::SeriesData, providers::SeriesSource};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    analytics,
    chart::{ChartKind, ChartOptions, ChartRenderer, ChartSpec},
    classify,
    lexicon::Lexicon,
    models::{
        DatasetMeta, NormalizeStatus, OrchestratorResponse, ProcessedDataset, QueryDetails,
        QueryType,
    },
    resolve,
    retrieval::{DateWindowError, SeriesFetcher, date_window},
};

/// Index base used when normalizing series for comparison.
const NORMALIZE_BASE: f64 = 100.0;

/// Tunable knobs, usually sourced from [`crate::config::AssistantConfig`].
#[derive(Clone, Copy, Debug)]
pub struct OrchestratorOptions {
    pub search_limit: usize,
    pub recession_shading: bool,
    pub source_caption: bool,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            search_limit: 5,
            recession_shading: true,
            source_caption: true,
        }
    }
}

/// Internal failures that abort one query and surface as the apology path.
#[derive(Debug, Error)]
enum OrchestratorError {
    #[error(transparent)]
    Window(#[from] DateWindowError),
}

/// State-free coordinator: one call to [`Orchestrator::handle_query`] runs a
/// full classify -> resolve -> fetch -> transform cycle and produces a
/// complete response. Nothing is kept between queries.
pub struct Orchestrator {
    fetcher: SeriesFetcher,
    lexicon: Lexicon,
    renderer: Option<Arc<dyn ChartRenderer>>,
    options: OrchestratorOptions,
}

impl Orchestrator {
    pub fn new(source: Arc<dyn SeriesSource>) -> Self {
        Self::with_options(source, OrchestratorOptions::default())
    }

    pub fn with_options(source: Arc<dyn SeriesSource>, options: OrchestratorOptions) -> Self {
        Self {
            fetcher: SeriesFetcher::new(source),
            lexicon: Lexicon::new(),
            renderer: None,
            options,
        }
    }

    /// Wires the chart-rendering collaborator. Without one, chart requests
    /// still produce a [`ChartSpec`] in the response; nothing is handed off.
    pub fn with_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Handles one query end to end.
    ///
    /// Always returns a complete response: internal failures are logged and
    /// folded into `error_message` together with an apology, never
    /// propagated to the caller.
    pub async fn handle_query(&self, raw_query: &str) -> OrchestratorResponse {
        info!(raw_query, "handling query");
        let details = classify::parse_query(&self.lexicon, raw_query);

        match self.dispatch(details.clone()).await {
            Ok(response) => response,
            Err(err) => {
                error!(%err, raw_query, "query handling failed unexpectedly");
                let summary = format!(
                    "I'm sorry, but I ran into an unexpected problem while processing your request: {err}"
                );
                OrchestratorResponse::failure(details, summary, err.to_string())
            }
        }
    }

    async fn dispatch(
        &self,
        details: QueryDetails,
    ) -> Result<OrchestratorResponse, OrchestratorError> {
        match details.query_type {
            QueryType::SeriesSearch => Ok(self.run_series_search(details).await),
            QueryType::DataRetrieval
            | QueryType::SingleDatapoint
            | QueryType::TrendOverTime
            | QueryType::GeographicalComparison => self.run_retrieval(details).await,
            _ => Ok(OrchestratorResponse::failure(
                details,
                "I'm not sure how to handle that query. Try searching for series \
                 (e.g. \"search for US GDP\") or asking for an indicator and location \
                 (e.g. \"US GDP trend over the last 5 years\").",
                "Unsupported query type.",
            )),
        }
    }

    async fn run_series_search(&self, details: QueryDetails) -> OrchestratorResponse {
        let search_term = match (details.indicators.first(), details.locations.first()) {
            (Some(indicator), Some(location)) => format!("{indicator} for {location}"),
            (Some(indicator), None) => indicator.clone(),
            _ => details.raw_query.clone(),
        };

        let results = self
            .fetcher
            .search(&search_term, self.options.search_limit)
            .await;
        if results.is_empty() {
            let summary = format!("No series found matching your search term: '{search_term}'.");
            return OrchestratorResponse::text_only(details, summary);
        }

        let mut summary = String::from("Found the following series based on your search:\n");
        for item in &results {
            summary.push_str(&format!("- {}: {}", item.id, item.title));
            if let Some(popularity) = item.popularity {
                summary.push_str(&format!(" (popularity {popularity})"));
            }
            summary.push('\n');
        }
        OrchestratorResponse::text_only(details, summary.trim_end().to_string())
    }

    async fn run_retrieval(
        &self,
        details: QueryDetails,
    ) -> Result<OrchestratorResponse, OrchestratorError> {
        // One (indicator, location) request per series needed.
        let mut requests: Vec<(String, String)> = Vec::new();
        if details.query_type == QueryType::GeographicalComparison
            && details.locations.len() > 1
            && !details.indicators.is_empty()
        {
            let indicator = &details.indicators[0];
            for location in &details.locations {
                requests.push((indicator.clone(), location.clone()));
            }
        } else if let (Some(indicator), Some(location)) =
            (details.indicators.first(), details.locations.first())
        {
            requests.push((indicator.clone(), location.clone()));
        } else {
            let mut summary = String::from(
                "I need an indicator (like \"GDP\") and a location (like \"US\" or a state name) to fetch data.",
            );
            if details.indicators.is_empty() {
                summary.push_str(" Indicator missing.");
            }
            if details.locations.is_empty() {
                summary.push_str(" Location missing.");
            }
            return Ok(OrchestratorResponse::failure(
                details,
                summary,
                "Insufficient information for data retrieval.",
            ));
        }

        let window = date_window(details.time_periods.first().map(String::as_str))?;

        let mut notes: Vec<String> = Vec::new();
        let mut fetched: IndexMap<String, SeriesData> = IndexMap::new();
        for (indicator, location) in &requests {
            let Some(series_id) =
                resolve::resolve_series(&self.fetcher, indicator, location).await
            else {
                notes.push(format!(
                    "Could not find a series for '{indicator}' in '{location}'."
                ));
                continue;
            };

            match self.fetcher.series_data(&series_id, window).await {
                Some(series) if !series.data.is_empty() => {
                    notes.push(format!(
                        "Retrieved {} data points for '{}'.",
                        series.data.len(),
                        series.info.title
                    ));
                    fetched.insert(series_id, series);
                }
                _ => notes.push(format!(
                    "No data found for '{indicator}' in '{location}' (series {series_id})."
                )),
            }
        }

        if fetched.is_empty() {
            let message = if notes.is_empty() {
                "No data could be retrieved for any specified series.".to_string()
            } else {
                notes.join("\n")
            };
            return Ok(OrchestratorResponse::failure(
                details,
                message.clone(),
                message,
            ));
        }

        if details.query_type == QueryType::TrendOverTime {
            for series in fetched.values() {
                if let Ok(metric) = analytics::total_growth(&series.data) {
                    let mut line = format!(
                        "Total growth for '{}': {} ({} to {})",
                        series.info.title, metric.value, metric.start_date, metric.end_date
                    );
                    if let Ok(rate) = analytics::cagr(&series.data) {
                        line.push_str(&format!("; CAGR {} over {} years", rate.value, rate.years));
                    }
                    line.push('.');
                    notes.push(line);
                }
            }
        }

        let mut datasets: Vec<ProcessedDataset> = fetched
            .iter()
            .map(|(id, series)| ProcessedDataset {
                id: id.clone(),
                name: if series.info.title.is_empty() {
                    id.clone()
                } else {
                    series.info.title.clone()
                },
                points: series.data.clone(),
                meta: DatasetMeta {
                    source_id: id.clone(),
                    original_units: Some(series.info.units.clone()),
                    ..DatasetMeta::default()
                },
            })
            .collect();

        let mut normalized_for_plot = false;
        if details.flags.normalize && fetched.len() > 1 {
            datasets = fetched
                .values()
                .zip(datasets)
                .map(|(series, original)| {
                    let normalized = analytics::normalize(series, NORMALIZE_BASE);
                    if normalized.meta.status == NormalizeStatus::Success {
                        normalized
                    } else {
                        warn!(
                            series_id = %original.id,
                            "normalization failed, keeping original dataset"
                        );
                        original
                    }
                })
                .collect();
            notes.push("Data has been normalized for comparison.".to_string());
            normalized_for_plot = true;
        }

        let mut chart_spec = None;
        if let Some(kind) = details.chart {
            if !datasets.is_empty() {
                let spec = self.build_chart_spec(kind, &details, &datasets, normalized_for_plot);
                if let Some(renderer) = &self.renderer {
                    match renderer.render(&spec, &datasets) {
                        Ok(()) => notes.push(
                            "A chart has been generated and is available for display.".to_string(),
                        ),
                        Err(err) => {
                            warn!(%err, "chart rendering failed");
                            notes.push(format!("The chart could not be rendered: {err}"));
                        }
                    }
                }
                chart_spec = Some(spec);
            }
        }

        Ok(OrchestratorResponse {
            query: details,
            datasets,
            summary: notes.join("\n"),
            chart: chart_spec,
            error_message: None,
        })
    }

    fn build_chart_spec(
        &self,
        kind: ChartKind,
        details: &QueryDetails,
        datasets: &[ProcessedDataset],
        normalized_for_plot: bool,
    ) -> ChartSpec {
        let mut title = details
            .indicators
            .first()
            .cloned()
            .unwrap_or_else(|| "Economic data".to_string());
        if !details.locations.is_empty() {
            title.push_str(&format!(" for {}", details.locations.join(", ")));
        }
        if normalized_for_plot {
            title.push_str(" (Normalized)");
        }

        let y_axis_label =
            if normalized_for_plot && datasets[0].meta.status == NormalizeStatus::Success {
                datasets[0]
                    .meta
                    .normalized_units
                    .clone()
                    .unwrap_or_else(|| "Index (Normalized)".to_string())
            } else {
                datasets[0]
                    .meta
                    .original_units
                    .clone()
                    .unwrap_or_else(|| "Value".to_string())
            };

        ChartSpec {
            kind,
            title,
            dataset_ids: datasets.iter().map(|d| d.id.clone()).collect(),
            x_axis_label: None,
            y_axis_label,
            options: ChartOptions {
                recession_shading: self.options.recession_shading,
                source_caption: self.options.source_caption,
                normalized: normalized_for_plot,
            },
        }
    }
}
