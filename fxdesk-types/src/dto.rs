//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ExchangeRate, SyncPeriod, Transaction, TransactionType};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record the exchange rate for a day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRateRequest {
    /// ISO calendar date
    #[schema(example = "2024-01-01")]
    pub date: NaiveDate,
    /// Pesos per US dollar
    #[schema(example = 55.5)]
    pub usd_php_rate: f64,
    /// Optional dollar index; omit when not recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_index: Option<f64>,
}

impl CreateRateRequest {
    /// Validates the payload into a rate record.
    pub fn into_rate(self) -> Result<ExchangeRate, DomainError> {
        ExchangeRate::new(self.date, self.usd_php_rate, self.dollar_index)
    }
}

/// Optional inclusive date bounds for listing rates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RateRangeQuery {
    /// First day to include
    pub from: Option<NaiveDate>,
    /// Last day to include
    pub to: Option<NaiveDate>,
}

impl RateRangeQuery {
    /// Rejects ranges whose start is after their end.
    pub fn validate(self) -> Result<Self, DomainError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(DomainError::InvalidDateRange { from, to }),
            _ => Ok(self),
        }
    }
}

/// Query for pulling rates from the upstream feed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SyncRatesQuery {
    /// Look-back period (1D, 1W, 2W, 1M, 3M, 6M, 1Y); defaults to 1D
    #[param(value_type = Option<String>, example = "1W")]
    pub period: Option<SyncPeriod>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a cash transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// ISO calendar date of the movement
    #[schema(example = "2024-01-02")]
    pub transaction_date: NaiveDate,
    /// BUY or SELL
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount in US dollars
    #[schema(example = 100.0)]
    pub amount_usd: f64,
    /// Pesos per dollar applied
    #[schema(example = 56.1)]
    pub rate: f64,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateTransactionRequest {
    /// Validates the payload into a ledger entry.
    pub fn into_transaction(self) -> Result<Transaction, DomainError> {
        Transaction::new(
            self.transaction_date,
            self.transaction_type,
            self.amount_usd,
            self.rate,
            self.notes,
        )
    }
}
