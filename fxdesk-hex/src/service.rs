//! fxdesk Application Service
//!
//! Orchestrates rate-store and ledger operations through the repository port.
//! Contains NO infrastructure logic - pure validation and orchestration.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use fxdesk_types::domain::averages::LONG_WINDOW;
use fxdesk_types::{
    AppError, CreateRateRequest, CreateTransactionRequest, ExchangeRate, FxRepository,
    LedgerRepository, LedgerSummary, MovingAverages, RateFeed, RateRangeQuery, RateRepository,
    SyncPeriod, Transaction,
};

/// Symbols requested from the feed on every sync.
const SYNC_SYMBOLS: [&str; 2] = ["PHP", "EUR"];

/// Application service for rate and ledger operations.
///
/// Generic over `R: FxRepository` - the store adapter is injected at compile
/// time. The upstream feed sits behind a trait object since it is only used
/// by the sync operation.
pub struct FxService<R: FxRepository> {
    repo: R,
    feed: Arc<dyn RateFeed>,
}

impl<R: FxRepository> FxService<R> {
    /// Creates a new service over the given store and feed.
    pub fn new(repo: R, feed: Arc<dyn RateFeed>) -> Self {
        Self { repo, feed }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate Store
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records the rate for a day, replacing any existing record for that date.
    pub async fn add_rate(&self, req: CreateRateRequest) -> Result<ExchangeRate, AppError> {
        let rate = req.into_rate()?;
        let stored = self.repo.upsert_rate(rate).await?;
        tracing::info!(date = %stored.date, usd_php_rate = stored.usd_php_rate, "rate stored");
        Ok(stored)
    }

    /// Returns the rate with the most recent date.
    pub async fn latest_rate(&self) -> Result<ExchangeRate, AppError> {
        self.repo
            .latest_rate()
            .await
            .map_err(Into::into)
            .and_then(|opt| {
                opt.ok_or_else(|| AppError::NotFound("No exchange rate recorded".into()))
            })
    }

    /// Lists rates inside the optional date bounds, oldest first.
    pub async fn list_rates(&self, query: RateRangeQuery) -> Result<Vec<ExchangeRate>, AppError> {
        let query = query.validate()?;
        self.repo
            .list_rates(query.from, query.to)
            .await
            .map_err(Into::into)
    }

    /// Computes the 20/50-record moving averages at the latest date.
    pub async fn moving_averages(&self) -> Result<MovingAverages, AppError> {
        let recent = self.repo.recent_rates(LONG_WINDOW).await?;
        MovingAverages::from_recent(&recent)
            .ok_or_else(|| AppError::NotFound("No exchange rate recorded".into()))
    }

    /// Pulls the period ending today from the feed and upserts it.
    pub async fn sync_rates(&self, period: SyncPeriod) -> Result<Vec<ExchangeRate>, AppError> {
        self.sync_rates_until(period, Utc::now().date_naive()).await
    }

    /// Pulls the period ending on `end` from the feed and upserts it.
    ///
    /// Days without a usable PHP quote are skipped; days without a EUR quote
    /// are stored without a dollar index.
    pub async fn sync_rates_until(
        &self,
        period: SyncPeriod,
        end: NaiveDate,
    ) -> Result<Vec<ExchangeRate>, AppError> {
        let start = period.start_for(end)?;
        let series = self
            .feed
            .daily_rates(start, end, "USD", &SYNC_SYMBOLS)
            .await?;

        let mut rates = Vec::with_capacity(series.len());
        for (date, quotes) in series {
            let Some(&php) = quotes.get("PHP") else {
                tracing::warn!(%date, "feed returned no PHP quote, skipping");
                continue;
            };
            let dollar_index = quotes
                .get("EUR")
                .and_then(|&eur| ExchangeRate::dollar_index_from_eur(eur));
            match ExchangeRate::new(date, php, dollar_index) {
                Ok(rate) => rates.push(rate),
                Err(e) => {
                    tracing::warn!(%date, error = %e, "feed returned unusable quote, skipping");
                }
            }
        }

        if rates.is_empty() {
            tracing::info!(%period, %start, %end, "feed returned no rates");
            return Ok(rates);
        }

        let stored = self.repo.upsert_rates(rates).await?;
        tracing::info!(%period, count = stored.len(), "rates synced from feed");
        Ok(stored)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transaction Ledger
    // ─────────────────────────────────────────────────────────────────────────────

    /// Appends a validated transaction to the ledger.
    pub async fn add_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        let tx = req.into_transaction()?;
        let stored = self.repo.append_transaction(tx).await?;
        tracing::info!(
            id = %stored.id,
            kind = %stored.transaction_type,
            amount_usd = stored.amount_usd,
            "transaction recorded"
        );
        Ok(stored)
    }

    /// Lists every transaction in insertion order.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        self.repo.list_transactions().await.map_err(Into::into)
    }

    /// Totals, average rates, position and realized P/L over the ledger.
    pub async fn ledger_summary(&self) -> Result<LedgerSummary, AppError> {
        let transactions = self.repo.list_transactions().await?;
        Ok(LedgerSummary::from_transactions(&transactions))
    }
}
