//! Domain models for the fxdesk service.

pub mod averages;
pub mod period;
pub mod rate;
pub mod summary;
pub mod transaction;

pub use averages::MovingAverages;
pub use period::SyncPeriod;
pub use rate::ExchangeRate;
pub use summary::{LedgerSummary, MonthlyVolume};
pub use transaction::{Transaction, TransactionId, TransactionType};

use crate::error::DomainError;

/// Rejects NaN/infinite and non-positive values for a named field.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NotFinite(field));
    }
    if value <= 0.0 {
        return Err(DomainError::NonPositive { field, value });
    }
    Ok(value)
}
