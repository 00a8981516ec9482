//! Simple moving averages over the most recent rate records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rate::ExchangeRate;

/// Short window length, in records.
pub const SHORT_WINDOW: usize = 20;
/// Long window length, in records.
pub const LONG_WINDOW: usize = 50;

/// 20- and 50-record moving averages of `usd_php_rate`, anchored at `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MovingAverages {
    /// Date of the newest record in both windows
    #[schema(example = "2024-03-01")]
    pub date: NaiveDate,
    /// Average of the 20 most recent records; null while fewer exist
    pub ma_20: Option<f64>,
    /// Average of the 50 most recent records; null while fewer exist
    pub ma_50: Option<f64>,
}

impl MovingAverages {
    /// Computes the averages from rates ordered newest first.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_recent(recent: &[ExchangeRate]) -> Option<Self> {
        let newest = recent.first()?;
        Some(Self {
            date: newest.date,
            ma_20: window_mean(recent, SHORT_WINDOW),
            ma_50: window_mean(recent, LONG_WINDOW),
        })
    }
}

fn window_mean(recent: &[ExchangeRate], window: usize) -> Option<f64> {
    if recent.len() < window {
        return None;
    }
    let sum: f64 = recent[..window].iter().map(|r| r.usd_php_rate).sum();
    Some(sum / window as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(len: usize) -> Vec<ExchangeRate> {
        let start: NaiveDate = "2024-01-01".parse().unwrap();
        // newest first: rate 1.0 at the newest date, increasing into the past
        (0..len)
            .map(|i| {
                let date = start + chrono::Days::new((len - 1 - i) as u64);
                ExchangeRate::from_parts(date, (i + 1) as f64, None)
            })
            .collect()
    }

    #[test]
    fn test_empty_has_no_averages() {
        assert!(MovingAverages::from_recent(&[]).is_none());
    }

    #[test]
    fn test_short_history_leaves_windows_null() {
        let averages = MovingAverages::from_recent(&series(10)).unwrap();
        assert_eq!(averages.ma_20, None);
        assert_eq!(averages.ma_50, None);
        assert_eq!(averages.date, "2024-01-10".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn test_full_windows() {
        let averages = MovingAverages::from_recent(&series(60)).unwrap();
        // mean of 1..=20 and 1..=50
        assert_eq!(averages.ma_20, Some(10.5));
        assert_eq!(averages.ma_50, Some(25.5));
    }
}
