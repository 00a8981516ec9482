//! Look-back periods for pulling rates from an upstream feed.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// How far back a feed sync reaches from its end date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SyncPeriod {
    #[default]
    #[serde(rename = "1D", alias = "1d")]
    OneDay,
    #[serde(rename = "1W", alias = "1w")]
    OneWeek,
    #[serde(rename = "2W", alias = "2w")]
    TwoWeeks,
    #[serde(rename = "1M", alias = "1m")]
    OneMonth,
    #[serde(rename = "3M", alias = "3m")]
    ThreeMonths,
    #[serde(rename = "6M", alias = "6m")]
    SixMonths,
    #[serde(rename = "1Y", alias = "1y")]
    OneYear,
}

impl SyncPeriod {
    /// Returns the first day covered when the period ends on `end`.
    pub fn start_for(self, end: NaiveDate) -> Result<NaiveDate, DomainError> {
        let start = match self {
            SyncPeriod::OneDay => end.checked_sub_days(Days::new(1)),
            SyncPeriod::OneWeek => end.checked_sub_days(Days::new(7)),
            SyncPeriod::TwoWeeks => end.checked_sub_days(Days::new(14)),
            SyncPeriod::OneMonth => end.checked_sub_months(Months::new(1)),
            SyncPeriod::ThreeMonths => end.checked_sub_months(Months::new(3)),
            SyncPeriod::SixMonths => end.checked_sub_months(Months::new(6)),
            SyncPeriod::OneYear => end.checked_sub_months(Months::new(12)),
        };
        start.ok_or_else(|| {
            DomainError::ValidationError(format!("Period {} before {} is out of range", self, end))
        })
    }
}

impl std::fmt::Display for SyncPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            SyncPeriod::OneDay => "1D",
            SyncPeriod::OneWeek => "1W",
            SyncPeriod::TwoWeeks => "2W",
            SyncPeriod::OneMonth => "1M",
            SyncPeriod::ThreeMonths => "3M",
            SyncPeriod::SixMonths => "6M",
            SyncPeriod::OneYear => "1Y",
        };
        f.write_str(code)
    }
}

impl std::str::FromStr for SyncPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1D" => Ok(SyncPeriod::OneDay),
            "1W" => Ok(SyncPeriod::OneWeek),
            "2W" => Ok(SyncPeriod::TwoWeeks),
            "1M" => Ok(SyncPeriod::OneMonth),
            "3M" => Ok(SyncPeriod::ThreeMonths),
            "6M" => Ok(SyncPeriod::SixMonths),
            "1Y" => Ok(SyncPeriod::OneYear),
            other => Err(DomainError::ValidationError(format!(
                "Unknown period: {}. Supported: 1D, 1W, 2W, 1M, 3M, 6M, 1Y",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_dates() {
        let end = day("2024-03-31");
        assert_eq!(SyncPeriod::OneDay.start_for(end).unwrap(), day("2024-03-30"));
        assert_eq!(SyncPeriod::TwoWeeks.start_for(end).unwrap(), day("2024-03-17"));
        // month arithmetic clamps to the last valid day
        assert_eq!(SyncPeriod::OneMonth.start_for(end).unwrap(), day("2024-02-29"));
        assert_eq!(SyncPeriod::OneYear.start_for(end).unwrap(), day("2023-03-31"));
    }

    #[test]
    fn test_parse_and_display() {
        let period: SyncPeriod = "3m".parse().unwrap();
        assert_eq!(period, SyncPeriod::ThreeMonths);
        assert_eq!(period.to_string(), "3M");
        assert!("2Y".parse::<SyncPeriod>().is_err());
    }

    #[test]
    fn test_deserialize_accepts_either_case() {
        for code in ["1D", "1W", "2W", "1M", "3M", "6M", "1Y"] {
            let expected: SyncPeriod = code.parse().unwrap();
            let upper: SyncPeriod = serde_json::from_str(&format!("\"{code}\"")).unwrap();
            let lower: SyncPeriod =
                serde_json::from_str(&format!("\"{}\"", code.to_lowercase())).unwrap();
            assert_eq!(upper, expected);
            assert_eq!(lower, expected);
        }
    }
}
