//! Static keyword tables for entity extraction.
//!
//! A [`Lexicon`] maps canonical concept keys to their surface-form patterns:
//! indicator keys ("gdp", "unemployment", ...) and location codes ("US",
//! "CA", ...). It is process-wide read-only configuration: build it once at
//! startup and pass it by reference into the extractor. Patterns are
//! compiled at construction, so matching a query is allocation-light.
//!
//! Matching rules:
//! - Multi-word patterns match by substring containment.
//! - Single-word patterns match as standalone words, so "us" does not match
//!   inside "house". Two-letter state codes still collide with prose words
//!   ("in", "or"); callers accept that trade-off.

use indexmap::IndexMap;
use regex::Regex;

/// Indicator key -> surface forms.
const INDICATOR_PATTERNS: &[(&str, &[&str])] = &[
    ("gdp", &["gdp", "gross domestic product"]),
    ("unemployment", &["unemployment rate", "unemployment", "jobless rate"]),
    ("inflation", &["inflation", "cpi", "consumer price index"]),
    (
        "housing",
        &["housing price", "hpi", "house price index", "home price index"],
    ),
    ("population", &["population", "pop"]),
    (
        "interest rate",
        &["interest rate", "federal funds rate", "fed rate"],
    ),
    ("nonfarm payrolls", &["nonfarm payrolls", "payrolls", "nfp"]),
];

/// Country-level synonyms, all normalized to the "US" code.
const US_SYNONYMS: &[&str] = &["us", "usa", "united states", "national", "federal"];

/// Postal code -> full state name, covering the 50 states plus DC and PR.
const STATE_NAMES: &[(&str, &str)] = &[
    ("AL", "alabama"),
    ("AK", "alaska"),
    ("AZ", "arizona"),
    ("AR", "arkansas"),
    ("CA", "california"),
    ("CO", "colorado"),
    ("CT", "connecticut"),
    ("DE", "delaware"),
    ("FL", "florida"),
    ("GA", "georgia"),
    ("HI", "hawaii"),
    ("ID", "idaho"),
    ("IL", "illinois"),
    ("IN", "indiana"),
    ("IA", "iowa"),
    ("KS", "kansas"),
    ("KY", "kentucky"),
    ("LA", "louisiana"),
    ("ME", "maine"),
    ("MD", "maryland"),
    ("MA", "massachusetts"),
    ("MI", "michigan"),
    ("MN", "minnesota"),
    ("MS", "mississippi"),
    ("MO", "missouri"),
    ("MT", "montana"),
    ("NE", "nebraska"),
    ("NV", "nevada"),
    ("NH", "new hampshire"),
    ("NJ", "new jersey"),
    ("NM", "new mexico"),
    ("NY", "new york"),
    ("NC", "north carolina"),
    ("ND", "north dakota"),
    ("OH", "ohio"),
    ("OK", "oklahoma"),
    ("OR", "oregon"),
    ("PA", "pennsylvania"),
    ("RI", "rhode island"),
    ("SC", "south carolina"),
    ("SD", "south dakota"),
    ("TN", "tennessee"),
    ("TX", "texas"),
    ("UT", "utah"),
    ("VT", "vermont"),
    ("VA", "virginia"),
    ("WA", "washington"),
    ("WV", "west virginia"),
    ("WI", "wisconsin"),
    ("WY", "wyoming"),
    ("DC", "district of columbia"),
    ("PR", "puerto rico"),
];

/// A compiled surface form.
#[derive(Debug)]
enum Pattern {
    /// Multi-word form, matched by substring containment.
    Substring(String),
    /// Single-word form, matched on word boundaries.
    Word(Regex),
}

impl Pattern {
    fn compile(surface: &str) -> Self {
        if surface.split_whitespace().count() > 1 {
            Pattern::Substring(surface.to_string())
        } else {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(surface)))
                .expect("static lexicon pattern");
            Pattern::Word(re)
        }
    }

    fn matches(&self, text_lower: &str) -> bool {
        match self {
            Pattern::Substring(needle) => text_lower.contains(needle.as_str()),
            Pattern::Word(re) => re.is_match(text_lower),
        }
    }
}

/// Immutable keyword tables with compiled patterns.
#[derive(Debug)]
pub struct Lexicon {
    indicators: IndexMap<&'static str, Vec<Pattern>>,
    locations: IndexMap<&'static str, Vec<Pattern>>,
}

impl Lexicon {
    pub fn new() -> Self {
        let indicators = INDICATOR_PATTERNS
            .iter()
            .map(|(key, surfaces)| {
                (*key, surfaces.iter().map(|s| Pattern::compile(s)).collect())
            })
            .collect();

        let mut locations: IndexMap<&'static str, Vec<Pattern>> = IndexMap::new();
        locations.insert(
            "US",
            US_SYNONYMS.iter().map(|s| Pattern::compile(s)).collect(),
        );
        for &(code, name) in STATE_NAMES {
            let patterns = vec![Pattern::compile(name), Pattern::compile(&code.to_lowercase())];
            locations.insert(code, patterns);
        }

        Self {
            indicators,
            locations,
        }
    }

    /// Indicator keys whose any surface form matches, in table order.
    pub fn match_indicators(&self, text_lower: &str) -> Vec<String> {
        Self::match_keys(&self.indicators, text_lower)
    }

    /// Canonical location codes whose any surface form matches, in table
    /// order. The code is returned regardless of which surface form hit.
    pub fn match_locations(&self, text_lower: &str) -> Vec<String> {
        Self::match_keys(&self.locations, text_lower)
    }

    fn match_keys(
        table: &IndexMap<&'static str, Vec<Pattern>>,
        text_lower: &str,
    ) -> Vec<String> {
        table
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|p| p.matches(text_lower)))
            .map(|(key, _)| key.to_string())
            .collect()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_indicator_matches_by_substring() {
        let lex = Lexicon::new();
        let keys = lex.match_indicators("show the gross domestic product please");
        assert_eq!(keys, vec!["gdp"]);
    }

    #[test]
    fn single_word_patterns_respect_word_boundaries() {
        let lex = Lexicon::new();
        // "us" must not fire inside "house".
        assert!(lex.match_locations("house prices are rising").is_empty());
        assert_eq!(lex.match_locations("gdp for us"), vec!["US"]);
    }

    #[test]
    fn location_surface_forms_normalize_to_codes() {
        let lex = Lexicon::new();
        assert_eq!(lex.match_locations("national unemployment"), vec!["US"]);
        assert_eq!(lex.match_locations("california and texas"), vec!["CA", "TX"]);
        assert_eq!(lex.match_locations("gdp for ny"), vec!["NY"]);
    }

    #[test]
    fn state_table_is_complete() {
        assert_eq!(STATE_NAMES.len(), 52);
        let lex = Lexicon::new();
        assert_eq!(lex.locations.len(), 53); // US + states
    }
}
