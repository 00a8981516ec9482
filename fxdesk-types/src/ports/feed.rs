//! Upstream rate feed port.
//!
//! Implementations can be HTTP clients, fixed-rate providers, mocks, etc.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Per-day quotes: date → (currency code → units per one base unit).
pub type DailyRates = BTreeMap<NaiveDate, BTreeMap<String, f64>>;

/// Error type for feed operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Malformed feed response: {0}")]
    Malformed(String),
}

/// Port trait for upstream daily rate providers.
#[async_trait::async_trait]
pub trait RateFeed: Send + Sync {
    /// Daily rates from `base` into each of `symbols`, for every business day
    /// the provider publishes in `from..=to`.
    async fn daily_rates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        base: &str,
        symbols: &[&str],
    ) -> Result<DailyRates, FeedError>;
}
