//! Entity extraction: indicators, locations, and time-period expressions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::Lexicon;

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("static regex"));

static LAST_N_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"last (\d+) (year|month|day|quarter)s?").expect("static regex"));

static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:from|between)\s+(19\d{2}|20\d{2})\s+(?:to|and)\s+(19\d{2}|20\d{2})")
        .expect("static regex")
});

/// Everything the extractor pulled out of one lowercased query.
///
/// Absent matches yield empty collections; extraction never fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedEntities {
    pub indicators: Vec<String>,
    pub locations: Vec<String>,
    pub time_periods: Vec<String>,
}

/// Scans lowercased text against the lexicon and the time-period patterns.
pub fn extract_entities(lexicon: &Lexicon, text_lower: &str) -> ExtractedEntities {
    ExtractedEntities {
        indicators: lexicon.match_indicators(text_lower),
        locations: lexicon.match_locations(text_lower),
        time_periods: extract_time_periods(text_lower),
    }
}

/// Recognizes time-period expressions, in priority order:
/// bare 4-digit years, "last N <unit>s", "latest"/"current"/"recent"
/// (normalized to "latest"), and "from/between Y1 to/and Y2" ranges
/// (normalized to "Y1 to Y2"). Duplicates are removed, first-seen order
/// preserved.
pub fn extract_time_periods(text_lower: &str) -> Vec<String> {
    let mut periods: Vec<String> = Vec::new();

    for cap in YEAR_RE.captures_iter(text_lower) {
        periods.push(cap[1].to_string());
    }

    for cap in LAST_N_RE.captures_iter(text_lower) {
        periods.push(format!("last {} {}s", &cap[1], &cap[2]));
    }

    if ["latest", "current", "recent"]
        .iter()
        .any(|kw| text_lower.contains(kw))
    {
        periods.push("latest".to_string());
    }

    for cap in RANGE_RE.captures_iter(text_lower) {
        periods.push(format!("{} to {}", &cap[1], &cap[2]));
    }

    let mut unique = Vec::with_capacity(periods.len());
    for period in periods {
        if !unique.contains(&period) {
            unique.push(period);
        }
    }
    unique
}
