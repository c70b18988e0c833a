//! Rule-based query classification.
//!
//! The classifier is an explicit ordered decision table: the first rule
//! whose predicate holds decides the query type, so precedence is auditable
//! and each predicate is testable on its own. It is deterministic keyword
//! matching, not a learned model.

use crate::chart::ChartKind;
use crate::extract::{ExtractedEntities, extract_entities};
use crate::lexicon::Lexicon;
use crate::models::{QueryDetails, QueryFlags, QueryType};

const COMPARISON_KEYWORDS: &[&str] = &["compare", "vs", "versus", "against", "vs."];

const TREND_KEYWORDS: &[&str] = &[
    "trend",
    "history",
    "historical",
    "over time",
    "plot data for",
    "show me data for",
];

const SEARCH_KEYWORDS: &[&str] = &["search for", "find series", "look up", "what series match"];

const VALUE_KEYWORDS: &[&str] = &[
    "what is the",
    "get the current",
    "show me the value",
    "current value of",
    "latest value for",
];

const VIZ_KEYWORDS: &[&str] = &["plot", "graph", "chart", "visualize", "draw", "show a graph of"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

struct RuleCtx<'a> {
    text: &'a str,
    entities: &'a ExtractedEntities,
}

impl RuleCtx<'_> {
    fn indicators(&self) -> usize {
        self.entities.indicators.len()
    }

    fn locations(&self) -> usize {
        self.entities.locations.len()
    }

    fn periods(&self) -> usize {
        self.entities.time_periods.len()
    }

    /// An indicator plus either a location or the degenerate "US" indicator
    /// signal: enough scope to fetch a concrete series.
    fn has_fetch_scope(&self) -> bool {
        self.indicators() >= 1
            && (self.locations() >= 1 || self.entities.indicators.iter().any(|i| i == "US"))
    }
}

struct Rule {
    outcome: QueryType,
    applies: fn(&RuleCtx) -> bool,
}

/// The decision table; first match wins, top to bottom.
const RULES: &[Rule] = &[
    Rule {
        outcome: QueryType::GeographicalComparison,
        applies: |ctx| {
            contains_any(ctx.text, COMPARISON_KEYWORDS)
                && ctx.locations() >= 2
                && ctx.indicators() >= 1
        },
    },
    Rule {
        outcome: QueryType::IndicatorComparison,
        applies: |ctx| contains_any(ctx.text, COMPARISON_KEYWORDS) && ctx.indicators() >= 2,
    },
    Rule {
        outcome: QueryType::TimeComparison,
        applies: |ctx| {
            contains_any(ctx.text, COMPARISON_KEYWORDS)
                && ctx.periods() >= 2
                && ctx.indicators() >= 1
        },
    },
    Rule {
        outcome: QueryType::ComparisonGeneric,
        applies: |ctx| contains_any(ctx.text, COMPARISON_KEYWORDS),
    },
    Rule {
        outcome: QueryType::TrendOverTime,
        applies: |ctx| contains_any(ctx.text, TREND_KEYWORDS),
    },
    Rule {
        outcome: QueryType::SeriesSearch,
        applies: |ctx| contains_any(ctx.text, SEARCH_KEYWORDS),
    },
    Rule {
        outcome: QueryType::SingleDatapoint,
        applies: |ctx| {
            ctx.has_fetch_scope()
                && (contains_any(ctx.text, VALUE_KEYWORDS)
                    || ctx.entities.time_periods == ["latest"])
        },
    },
    Rule {
        outcome: QueryType::DataRetrieval,
        applies: |ctx| ctx.has_fetch_scope(),
    },
    Rule {
        outcome: QueryType::DataRetrieval,
        applies: |ctx| ctx.indicators() >= 1 || ctx.locations() >= 1,
    },
];

/// Applies the decision table to already-extracted entities.
pub fn classify_type(text_lower: &str, entities: &ExtractedEntities) -> QueryType {
    let ctx = RuleCtx {
        text: text_lower,
        entities,
    };
    RULES
        .iter()
        .find(|rule| (rule.applies)(&ctx))
        .map(|rule| rule.outcome)
        .unwrap_or(QueryType::Unknown)
}

/// Parses one raw query into its structured interpretation.
pub fn parse_query(lexicon: &Lexicon, raw_query: &str) -> QueryDetails {
    let text_lower = raw_query.to_lowercase();
    let entities = extract_entities(lexicon, &text_lower);

    let mut query_type = classify_type(&text_lower, &entities);

    let mut time_periods = entities.time_periods.clone();
    if time_periods.is_empty()
        && !matches!(
            query_type,
            QueryType::SeriesSearch | QueryType::Unknown | QueryType::ComparisonGeneric
        )
    {
        time_periods.push("latest".to_string());
    }

    // A bare term with no recognizable entities is treated as a search term.
    if query_type == QueryType::Unknown
        && entities.indicators.is_empty()
        && entities.locations.is_empty()
        && entities.time_periods.is_empty()
        && !text_lower.trim().is_empty()
    {
        query_type = QueryType::SeriesSearch;
    }

    let chart = infer_chart_kind(&text_lower, query_type, &entities);

    let flags = QueryFlags {
        normalize: text_lower.contains("normalize"),
    };

    QueryDetails {
        raw_query: raw_query.to_string(),
        query_type,
        indicators: entities.indicators,
        locations: entities.locations,
        time_periods,
        flags,
        chart,
    }
}

/// Maps the final query type to a chart kind, when a visualization keyword
/// is present. No visualization keyword means no chart was requested.
fn infer_chart_kind(
    text_lower: &str,
    query_type: QueryType,
    entities: &ExtractedEntities,
) -> Option<ChartKind> {
    if !contains_any(text_lower, VIZ_KEYWORDS) {
        return None;
    }

    let kind = match query_type {
        QueryType::GeographicalComparison | QueryType::IndicatorComparison => {
            ChartKind::ComparisonBar
        }
        QueryType::TrendOverTime => ChartKind::Line,
        QueryType::SingleDatapoint
            if !entities.indicators.is_empty() && !entities.locations.is_empty() =>
        {
            ChartKind::SnapshotValue
        }
        QueryType::DataRetrieval
            if !entities.indicators.is_empty()
                && (!entities.locations.is_empty()
                    || entities.indicators.iter().any(|i| i == "US")) =>
        {
            ChartKind::Line
        }
        _ => ChartKind::Generic,
    };
    Some(kind)
}
