#![cfg(test)]
use chrono::NaiveDate;
use fred_ingestor::providers::{SeriesSource, fred_rest::FredProvider};

#[tokio::test]
#[ignore]
async fn fred_provider_fetches_gdp() {
    // This test requires FRED_API_KEY to be set in the environment.
    dotenvy::dotenv().ok();
    if std::env::var("FRED_API_KEY").is_err() {
        println!("Skipping fred_provider_fetches_gdp: FRED_API_KEY not set.");
        return;
    }

    let provider = FredProvider::new().expect("Failed to create FredProvider");

    let info = provider.series_info("GDP").await;
    assert!(info.is_some(), "Expected metadata for GDP");
    assert_eq!(info.unwrap().id, "GDP");

    let points = provider
        .observations(
            "GDP",
            NaiveDate::from_ymd_opt(2020, 1, 1),
            NaiveDate::from_ymd_opt(2021, 1, 1),
        )
        .await;
    assert!(!points.is_empty(), "Expected observations for GDP in 2020");
    assert!(points.iter().all(|p| p.value.is_some()));

    // Observations arrive sorted ascending.
    if points.len() > 1 {
        assert!(points[0].date < points[points.len() - 1].date);
    }

    let found = provider.search_series("real gross domestic product", 3).await;
    assert!(found.len() <= 3);
}
