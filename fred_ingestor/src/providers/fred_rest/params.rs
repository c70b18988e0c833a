use chrono::NaiveDate;

use crate::providers::errors::ProviderError;

/// FRED caps `limit` at 1000 per request.
const MAX_LIMIT: usize = 1000;

/// Validates and caps a search limit to FRED's accepted range.
pub(crate) fn clamp_limit(limit: usize) -> Result<usize, ProviderError> {
    if limit == 0 {
        return Err(ProviderError::Validation(
            "search limit must be at least 1".to_string(),
        ));
    }
    Ok(limit.min(MAX_LIMIT))
}

fn base_params(api_key: &str) -> Vec<(String, String)> {
    vec![
        ("api_key".to_string(), api_key.to_string()),
        ("file_type".to_string(), "json".to_string()),
    ]
}

pub(crate) fn search_params(api_key: &str, text: &str, limit: usize) -> Vec<(String, String)> {
    let mut params = base_params(api_key);
    params.push(("search_text".to_string(), text.to_string()));
    params.push(("limit".to_string(), limit.to_string()));
    params
}

pub(crate) fn info_params(api_key: &str, series_id: &str) -> Vec<(String, String)> {
    let mut params = base_params(api_key);
    params.push(("series_id".to_string(), series_id.to_string()));
    params
}

pub(crate) fn observation_params(
    api_key: &str,
    series_id: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<(String, String)> {
    let mut params = base_params(api_key);
    params.push(("series_id".to_string(), series_id.to_string()));
    if let Some(start) = start {
        params.push((
            "observation_start".to_string(),
            start.format("%Y-%m-%d").to_string(),
        ));
    }
    if let Some(end) = end {
        params.push((
            "observation_end".to_string(),
            end.format("%Y-%m-%d").to_string(),
        ));
    }
    params
}
