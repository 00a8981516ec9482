//! Store port traits.
//!
//! Adapters (in-memory, SQLite, Postgres) implement both traits. Mutating
//! operations must be atomic with respect to concurrent requests.

use chrono::NaiveDate;

use crate::domain::{ExchangeRate, Transaction};
use crate::error::RepoError;

/// Rate store: at most one record per date.
#[async_trait::async_trait]
pub trait RateRepository: Send + Sync + 'static {
    /// Inserts the rate, replacing any existing record for the same date.
    async fn upsert_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, RepoError>;

    /// Upserts a batch of rates as a single unit: all or nothing.
    async fn upsert_rates(&self, rates: Vec<ExchangeRate>) -> Result<Vec<ExchangeRate>, RepoError>;

    /// Returns the record with the greatest date.
    async fn latest_rate(&self) -> Result<Option<ExchangeRate>, RepoError>;

    /// Lists rates within the inclusive bounds, oldest first.
    async fn list_rates(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExchangeRate>, RepoError>;

    /// Returns up to `limit` records, newest first.
    async fn recent_rates(&self, limit: usize) -> Result<Vec<ExchangeRate>, RepoError>;
}

/// Transaction ledger: an append-only log.
#[async_trait::async_trait]
pub trait LedgerRepository: Send + Sync + 'static {
    /// Appends a transaction to the ledger.
    async fn append_transaction(&self, tx: Transaction) -> Result<Transaction, RepoError>;

    /// Lists all transactions in insertion order.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError>;
}

/// A store that backs both the rate store and the ledger.
pub trait FxRepository: RateRepository + LedgerRepository {}

impl<T: RateRepository + LedgerRepository> FxRepository for T {}
