//! Frankfurter HTTP feed.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use fxdesk_types::{DailyRates, FeedError, RateFeed};

/// Public Frankfurter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Time-series payload returned by `GET /{from}..{to}`.
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    base: String,
    rates: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

/// Rate feed backed by the Frankfurter API.
pub struct FrankfurterFeed {
    base_url: String,
    http: Client,
}

impl FrankfurterFeed {
    /// Creates a feed against `base_url` (usually [`DEFAULT_BASE_URL`]).
    pub fn new(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FeedError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn series_url(&self, from: NaiveDate, to: NaiveDate, base: &str, symbols: &[&str]) -> String {
        format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url,
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
            base,
            symbols.join(",")
        )
    }
}

#[async_trait]
impl RateFeed for FrankfurterFeed {
    #[tracing::instrument(skip(self, symbols))]
    async fn daily_rates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        base: &str,
        symbols: &[&str],
    ) -> Result<DailyRates, FeedError> {
        if symbols.is_empty() {
            return Err(FeedError::UnsupportedCurrency(String::new()));
        }

        let url = self.series_url(from, to, base, symbols);
        tracing::debug!(%url, "requesting rate series");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::ServiceUnavailable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::ServiceUnavailable(e.to_string()))?;

        if status == reqwest::StatusCode::NOT_FOUND
            || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            return Err(FeedError::UnsupportedCurrency(format!(
                "{} -> {}",
                base,
                symbols.join(",")
            )));
        }
        if !status.is_success() {
            return Err(FeedError::ServiceUnavailable(format!(
                "Frankfurter returned {}",
                status
            )));
        }

        let rates = parse_time_series(&body, base)?;
        tracing::info!(days = rates.len(), "rate series fetched");
        Ok(rates)
    }
}

fn parse_time_series(body: &str, expected_base: &str) -> Result<DailyRates, FeedError> {
    let parsed: TimeSeriesResponse =
        serde_json::from_str(body).map_err(|e| FeedError::Malformed(e.to_string()))?;

    if !parsed.base.eq_ignore_ascii_case(expected_base) {
        return Err(FeedError::Malformed(format!(
            "expected base {}, got {}",
            expected_base, parsed.base
        )));
    }

    Ok(parsed.rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "amount": 1.0,
        "base": "USD",
        "start_date": "2025-02-12",
        "end_date": "2025-02-13",
        "rates": {
            "2025-02-12": {"EUR": 0.9613, "PHP": 58.08},
            "2025-02-13": {"EUR": 0.9586, "PHP": 58.05}
        }
    }"#;

    #[test]
    fn test_parse_time_series() {
        let rates = parse_time_series(SAMPLE, "USD").unwrap();
        assert_eq!(rates.len(), 2);

        let day: NaiveDate = "2025-02-13".parse().unwrap();
        assert_eq!(rates[&day]["PHP"], 58.05);
        assert_eq!(rates[&day]["EUR"], 0.9586);
    }

    #[test]
    fn test_parse_rejects_wrong_base() {
        let result = parse_time_series(SAMPLE, "EUR");
        assert!(matches!(result, Err(FeedError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = parse_time_series("<html>oops</html>", "USD");
        assert!(matches!(result, Err(FeedError::Malformed(_))));
    }

    #[test]
    fn test_series_url() {
        let feed = FrankfurterFeed::new("https://api.frankfurter.app/").unwrap();
        let url = feed.series_url(
            "2024-01-01".parse().unwrap(),
            "2024-01-08".parse().unwrap(),
            "USD",
            &["PHP", "EUR"],
        );
        assert_eq!(
            url,
            "https://api.frankfurter.app/2024-01-01..2024-01-08?from=USD&to=PHP,EUR"
        );
    }
}
