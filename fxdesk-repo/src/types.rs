//! Database row structs shared by the SQLite and PostgreSQL adapters.
//!
//! Both backends decode these column types natively through sqlx's `uuid`
//! and `chrono` support: SQLite stores dates/timestamps as ISO text and UUIDs
//! as 16-byte blobs.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use fxdesk_types::{ExchangeRate, RepoError, Transaction, TransactionId, TransactionType};

/// Exchange rate row.
#[derive(FromRow)]
pub struct DbRate {
    pub date: NaiveDate,
    pub usd_php_rate: f64,
    pub dollar_index: Option<f64>,
}

impl DbRate {
    pub fn into_domain(self) -> ExchangeRate {
        ExchangeRate::from_parts(self.date, self.usd_php_rate, self.dollar_index)
    }
}

/// Transaction row.
#[derive(FromRow)]
pub struct DbTransaction {
    pub id: Uuid,
    pub transaction_date: NaiveDate,
    pub transaction_type: String,
    pub amount_usd: f64,
    pub rate: f64,
    pub amount_php: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbTransaction {
    pub fn into_domain(self) -> Result<Transaction, RepoError> {
        let transaction_type: TransactionType = self
            .transaction_type
            .parse()
            .map_err(|e: fxdesk_types::DomainError| RepoError::Database(e.to_string()))?;

        Ok(Transaction::from_parts(
            TransactionId::from_uuid(self.id),
            self.transaction_date,
            transaction_type,
            self.amount_usd,
            self.rate,
            self.amount_php,
            self.notes,
            self.created_at,
        ))
    }
}

/// Columns selected for [`DbRate`], in declaration order.
pub const RATE_COLUMNS: &str = "date, usd_php_rate, dollar_index";

/// Columns selected for [`DbTransaction`], in declaration order.
pub const TRANSACTION_COLUMNS: &str =
    "id, transaction_date, transaction_type, amount_usd, rate, amount_php, notes, created_at";
