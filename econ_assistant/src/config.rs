//! Runtime configuration for the assistant binary.
//!
//! A small TOML file tunes the FRED endpoint, the search result cap, and
//! chart option defaults. Every section and key is optional; missing pieces
//! fall back to the defaults below.
//!
//! ```toml
//! [fred]
//! base_url = "https://api.stlouisfed.org/fred"
//!
//! [search]
//! limit = 5
//!
//! [chart]
//! recession_shading = true
//! source_caption = true
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::orchestrate::OrchestratorOptions;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssistantConfig {
    pub fred: FredConfig,
    pub search: SearchConfig,
    pub chart: ChartConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FredConfig {
    /// Overrides the FRED API base URL (proxies, test servers).
    pub base_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Maximum number of results for a series search.
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub recession_shading: bool,
    pub source_caption: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            recession_shading: true,
            source_caption: true,
        }
    }
}

impl AssistantConfig {
    pub fn orchestrator_options(&self) -> OrchestratorOptions {
        OrchestratorOptions {
            search_limit: self.search.limit,
            recession_shading: self.chart.recession_shading,
            source_caption: self.chart.source_caption,
        }
    }
}

/// Parses a config from a TOML string.
pub fn load_config_str(raw: &str) -> anyhow::Result<AssistantConfig> {
    toml::from_str(raw).context("parse assistant config TOML")
}

/// Parses a config from a TOML file path.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<AssistantConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    load_config_str(&raw)
}
