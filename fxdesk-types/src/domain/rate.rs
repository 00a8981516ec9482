//! Exchange rate domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ensure_positive;
use crate::error::DomainError;

/// A daily USD/PHP exchange rate snapshot.
///
/// At most one record exists per `date`. A missing `dollar_index` means the
/// index was not recorded for that day; it is never treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRate {
    /// Calendar date of the snapshot (unique key)
    #[schema(example = "2024-01-01")]
    pub date: NaiveDate,
    /// Pesos per US dollar
    #[schema(example = 55.5)]
    pub usd_php_rate: f64,
    /// Dollar strength index, if recorded
    #[schema(example = json!(null))]
    pub dollar_index: Option<f64>,
}

impl ExchangeRate {
    /// Creates a validated rate record.
    ///
    /// # Validation
    /// - `usd_php_rate` must be finite and positive
    /// - `dollar_index`, when present, must be finite and positive
    pub fn new(
        date: NaiveDate,
        usd_php_rate: f64,
        dollar_index: Option<f64>,
    ) -> Result<Self, DomainError> {
        let usd_php_rate = ensure_positive("usd_php_rate", usd_php_rate)?;
        let dollar_index = dollar_index
            .map(|index| ensure_positive("dollar_index", index))
            .transpose()?;

        Ok(Self {
            date,
            usd_php_rate,
            dollar_index,
        })
    }

    /// Reconstructs a rate from stored fields without re-validating.
    pub fn from_parts(date: NaiveDate, usd_php_rate: f64, dollar_index: Option<f64>) -> Self {
        Self {
            date,
            usd_php_rate,
            dollar_index,
        }
    }

    /// Derives the dollar index from the USD→EUR rate of the same day.
    ///
    /// The index is `(1 / usd_eur) * 100`; unusable inputs yield `None`.
    pub fn dollar_index_from_eur(usd_eur: f64) -> Option<f64> {
        (usd_eur.is_finite() && usd_eur > 0.0).then(|| 100.0 / usd_eur)
    }
}
