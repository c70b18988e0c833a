use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use econ_assistant::{
    chart::{ChartRenderer, ChartSpec, RenderError},
    config::{AssistantConfig, load_config_path},
    models::ProcessedDataset,
    orchestrate::Orchestrator,
};
use fred_ingestor::providers::{SeriesSource, fred_rest::FredProvider};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to an optional TOML config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one natural-language question about economic series
    Ask {
        /// The question, e.g. "What is the latest GDP for US?"
        query: String,
    },

    /// Search series metadata directly
    Search {
        /// Free-text search term
        text: String,

        /// Maximum number of results
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

/// Records chart hand-offs in the log; actual drawing lives outside this
/// binary.
struct LoggingRenderer;

impl ChartRenderer for LoggingRenderer {
    fn render(&self, spec: &ChartSpec, datasets: &[ProcessedDataset]) -> Result<(), RenderError> {
        info!(
            kind = %spec.kind,
            title = %spec.title,
            datasets = datasets.len(),
            "chart handed off"
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => AssistantConfig::default(),
    };

    let mut provider = FredProvider::new().context("initialize FRED provider")?;
    if let Some(base_url) = &config.fred.base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    let source: Arc<dyn SeriesSource> = Arc::new(provider);

    match cli.command {
        Commands::Ask { query } => {
            let orchestrator =
                Orchestrator::with_options(source, config.orchestrator_options())
                    .with_renderer(Arc::new(LoggingRenderer));
            let response = orchestrator.handle_query(&query).await;

            println!("[{}] {}", response.query.query_type, response.query.raw_query);
            println!("{}", response.summary);
            for dataset in &response.datasets {
                println!(
                    "  dataset {} ({} points): {}",
                    dataset.id,
                    dataset.points.len(),
                    dataset.name
                );
            }
            if let Some(chart) = &response.chart {
                println!(
                    "  chart: {} \"{}\" [y: {}]",
                    chart.kind, chart.title, chart.y_axis_label
                );
            }
            if let Some(err) = &response.error_message {
                eprintln!("ERROR: {err}");
            }
        }

        Commands::Search { text, limit } => {
            let results = source.search_series(&text, limit).await;
            if results.is_empty() {
                println!("No series found for '{text}'.");
            }
            for item in results {
                println!(
                    "{}\t{}\t{}",
                    item.id,
                    item.title,
                    item.popularity
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
            }
        }
    }

    Ok(())
}
