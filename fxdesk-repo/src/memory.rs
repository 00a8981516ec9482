//! In-memory store adapter.
//!
//! State lives for the lifetime of the process. Writers take the exclusive
//! lock, readers share it, so reads never observe a half-applied batch.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use fxdesk_types::{ExchangeRate, LedgerRepository, RateRepository, RepoError, Transaction};

/// Process-local rate store and ledger.
#[derive(Default)]
pub struct MemoryRepo {
    rates: RwLock<BTreeMap<NaiveDate, ExchangeRate>>,
    ledger: RwLock<Vec<Transaction>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateRepository for MemoryRepo {
    async fn upsert_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, RepoError> {
        self.rates.write().await.insert(rate.date, rate.clone());
        Ok(rate)
    }

    async fn upsert_rates(&self, rates: Vec<ExchangeRate>) -> Result<Vec<ExchangeRate>, RepoError> {
        let mut store = self.rates.write().await;
        for rate in &rates {
            store.insert(rate.date, rate.clone());
        }
        Ok(rates)
    }

    async fn latest_rate(&self) -> Result<Option<ExchangeRate>, RepoError> {
        Ok(self
            .rates
            .read()
            .await
            .last_key_value()
            .map(|(_, rate)| rate.clone()))
    }

    async fn list_rates(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExchangeRate>, RepoError> {
        Ok(self
            .rates
            .read()
            .await
            .values()
            .filter(|r| from.is_none_or(|from| r.date >= from))
            .filter(|r| to.is_none_or(|to| r.date <= to))
            .cloned()
            .collect())
    }

    async fn recent_rates(&self, limit: usize) -> Result<Vec<ExchangeRate>, RepoError> {
        Ok(self
            .rates
            .read()
            .await
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LedgerRepository for MemoryRepo {
    async fn append_transaction(&self, tx: Transaction) -> Result<Transaction, RepoError> {
        self.ledger.write().await.push(tx.clone());
        Ok(tx)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
        Ok(self.ledger.read().await.clone())
    }
}
