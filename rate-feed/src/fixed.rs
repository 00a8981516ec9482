//! Fixed-rate feed for development and testing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};

use fxdesk_types::{DailyRates, FeedError, RateFeed};

/// Units of each currency per one US dollar.
const UNITS_PER_USD: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("PHP", 56.05),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("INR", 83.12),
    ("JPY", 149.5),
];

fn units_per_usd(code: &str) -> Result<f64, FeedError> {
    UNITS_PER_USD
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, rate)| *rate)
        .ok_or_else(|| FeedError::UnsupportedCurrency(code.to_string()))
}

/// Serves the same cross rates for every weekday; weekends are skipped the
/// way reference-rate publishers skip them.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    drift_percent: f64,
}

impl StaticFeed {
    /// A feed with flat rates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a deterministic per-day wobble of up to `percent` so series are
    /// not flat. The same date always yields the same rate.
    pub fn with_daily_drift(mut self, percent: f64) -> Self {
        self.drift_percent = percent;
        self
    }

    fn drift(&self, date: NaiveDate) -> f64 {
        if self.drift_percent == 0.0 {
            return 1.0;
        }
        let phase = (date.num_days_from_ce() % 21) as f64 / 10.0 - 1.0;
        1.0 + self.drift_percent / 100.0 * phase
    }
}

#[async_trait]
impl RateFeed for StaticFeed {
    async fn daily_rates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        base: &str,
        symbols: &[&str],
    ) -> Result<DailyRates, FeedError> {
        let base_per_usd = units_per_usd(base)?;
        let quotes = symbols
            .iter()
            .map(|code| Ok((code.to_ascii_uppercase(), units_per_usd(code)? / base_per_usd)))
            .collect::<Result<Vec<_>, FeedError>>()?;

        let mut series = DailyRates::new();
        for date in from.iter_days().take_while(|d| *d <= to) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }
            let factor = self.drift(date);
            let day: BTreeMap<String, f64> = quotes
                .iter()
                .map(|(code, rate)| (code.clone(), rate * factor))
                .collect();
            series.insert(date, day);
        }

        Ok(series)
    }
}
