//! Heuristic mapping from (indicator, location) to a concrete series id.

use tracing::{info, warn};

use crate::retrieval::SeriesFetcher;

/// Well-known national series, checked before any search round-trip.
fn well_known_us_series(indicator_lower: &str) -> Option<&'static str> {
    if indicator_lower.contains("gdp")
        && (indicator_lower.contains("real") || indicator_lower.contains("rgdp"))
    {
        Some("GDPC1")
    } else if indicator_lower.contains("gdp") {
        Some("GDP")
    } else if indicator_lower.contains("cpi") || indicator_lower.contains("inflation") {
        Some("CPIAUCSL")
    } else if indicator_lower.contains("unemployment") {
        Some("UNRATE")
    } else if indicator_lower.contains("nonfarm payrolls") || indicator_lower.contains("nfp") {
        Some("PAYEMS")
    } else {
        None
    }
}

/// Resolves one (indicator, location) pair to a series id.
///
/// Order, first success wins: the hard-coded US table, a search for
/// "{indicator} {location}" taking the top-ranked hit, and for national
/// queries a final search on the indicator alone. `None` is a soft failure
/// the caller reports and survives.
pub async fn resolve_series(
    fetcher: &SeriesFetcher,
    indicator: &str,
    location: &str,
) -> Option<String> {
    let indicator_lower = indicator.to_lowercase();
    let is_national = location.eq_ignore_ascii_case("us");

    if is_national {
        if let Some(id) = well_known_us_series(&indicator_lower) {
            info!(indicator, series_id = id, "matched well-known national series");
            return Some(id.to_string());
        }
    }

    let search_term = format!("{indicator} {location}");
    if let Some(hit) = fetcher.search(&search_term, 1).await.into_iter().next() {
        info!(search_term, series_id = %hit.id, "resolved via search");
        return Some(hit.id);
    }

    if is_national {
        if let Some(hit) = fetcher.search(indicator, 1).await.into_iter().next() {
            info!(indicator, series_id = %hit.id, "resolved via national fallback search");
            return Some(hit.id);
        }
    }

    warn!(indicator, location, "no series id found");
    None
}
