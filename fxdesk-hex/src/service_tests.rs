//! FxService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use fxdesk_types::{
        AppError, CreateRateRequest, CreateTransactionRequest, DailyRates, ExchangeRate,
        FeedError, LedgerRepository, RateFeed, RateRangeQuery, RateRepository, RepoError,
        SyncPeriod, Transaction, TransactionType,
    };

    use crate::FxService;

    /// Simple in-memory repository for testing the service layer.
    #[derive(Default)]
    pub struct MockRepo {
        rates: Mutex<BTreeMap<NaiveDate, ExchangeRate>>,
        transactions: Mutex<Vec<Transaction>>,
    }

    #[async_trait]
    impl RateRepository for MockRepo {
        async fn upsert_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, RepoError> {
            self.rates.lock().unwrap().insert(rate.date, rate.clone());
            Ok(rate)
        }

        async fn upsert_rates(
            &self,
            rates: Vec<ExchangeRate>,
        ) -> Result<Vec<ExchangeRate>, RepoError> {
            let mut store = self.rates.lock().unwrap();
            for rate in &rates {
                store.insert(rate.date, rate.clone());
            }
            Ok(rates)
        }

        async fn latest_rate(&self) -> Result<Option<ExchangeRate>, RepoError> {
            Ok(self.rates.lock().unwrap().values().next_back().cloned())
        }

        async fn list_rates(
            &self,
            from: Option<NaiveDate>,
            to: Option<NaiveDate>,
        ) -> Result<Vec<ExchangeRate>, RepoError> {
            Ok(self
                .rates
                .lock()
                .unwrap()
                .values()
                .filter(|r| from.is_none_or(|f| r.date >= f) && to.is_none_or(|t| r.date <= t))
                .cloned()
                .collect())
        }

        async fn recent_rates(&self, limit: usize) -> Result<Vec<ExchangeRate>, RepoError> {
            Ok(self
                .rates
                .lock()
                .unwrap()
                .values()
                .rev()
                .take(limit)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl LedgerRepository for MockRepo {
        async fn append_transaction(&self, tx: Transaction) -> Result<Transaction, RepoError> {
            self.transactions.lock().unwrap().push(tx.clone());
            Ok(tx)
        }

        async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
            Ok(self.transactions.lock().unwrap().clone())
        }
    }

    /// Feed returning a canned series, or failing outright.
    pub struct MockFeed {
        series: Option<DailyRates>,
        requested: Mutex<Vec<(NaiveDate, NaiveDate)>>,
    }

    impl MockFeed {
        pub fn with_series(series: DailyRates) -> Self {
            Self {
                series: Some(series),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                series: None,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RateFeed for MockFeed {
        async fn daily_rates(
            &self,
            from: NaiveDate,
            to: NaiveDate,
            _base: &str,
            _symbols: &[&str],
        ) -> Result<DailyRates, FeedError> {
            self.requested.lock().unwrap().push((from, to));
            self.series
                .clone()
                .ok_or_else(|| FeedError::ServiceUnavailable("feed offline".into()))
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn service() -> FxService<MockRepo> {
        FxService::new(
            MockRepo::default(),
            Arc::new(MockFeed::with_series(DailyRates::new())),
        )
    }

    fn rate_req(date: &str, usd_php_rate: f64) -> CreateRateRequest {
        CreateRateRequest {
            date: day(date),
            usd_php_rate,
            dollar_index: None,
        }
    }

    fn tx_req(kind: TransactionType, amount_usd: f64, rate: f64) -> CreateTransactionRequest {
        CreateTransactionRequest {
            transaction_date: day("2024-01-02"),
            transaction_type: kind,
            amount_usd,
            rate,
            notes: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rates
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_add_then_latest_rate() {
        let service = service();

        let stored = service
            .add_rate(CreateRateRequest {
                date: day("2024-01-01"),
                usd_php_rate: 55.5,
                dollar_index: Some(102.3),
            })
            .await
            .unwrap();
        let latest = service.latest_rate().await.unwrap();

        assert_eq!(stored, latest);
        assert_eq!(latest.usd_php_rate, 55.5);
        assert_eq!(latest.dollar_index, Some(102.3));
    }

    #[tokio::test]
    async fn test_latest_rate_picks_greatest_date_not_last_inserted() {
        let service = service();

        service.add_rate(rate_req("2024-01-05", 56.0)).await.unwrap();
        service.add_rate(rate_req("2024-01-03", 55.0)).await.unwrap();

        let latest = service.latest_rate().await.unwrap();

        assert_eq!(latest.date, day("2024-01-05"));
    }

    #[tokio::test]
    async fn test_latest_rate_empty_is_not_found() {
        let result = service().latest_rate().await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_rate_non_positive_rejected() {
        let service = service();

        for bad in [0.0, -1.0, f64::NAN] {
            let result = service.add_rate(rate_req("2024-01-01", bad)).await;
            assert!(matches!(result, Err(AppError::Validation(_))), "{bad}");
        }
        assert!(service.repo().latest_rate().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_date_replaces_previous_rate() {
        let service = service();

        service.add_rate(rate_req("2024-01-01", 55.0)).await.unwrap();
        service.add_rate(rate_req("2024-01-01", 57.0)).await.unwrap();

        let all = service.list_rates(RateRangeQuery::default()).await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].usd_php_rate, 57.0);
    }

    #[tokio::test]
    async fn test_list_rates_inverted_range_rejected() {
        let result = service()
            .list_rates(RateRangeQuery {
                from: Some(day("2024-02-01")),
                to: Some(day("2024-01-01")),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_moving_averages() {
        let service = service();
        let start = day("2024-01-01");
        for i in 0..25u64 {
            let date = start + chrono::Days::new(i);
            service
                .add_rate(CreateRateRequest {
                    date,
                    usd_php_rate: 50.0 + i as f64,
                    dollar_index: None,
                })
                .await
                .unwrap();
        }

        let averages = service.moving_averages().await.unwrap();

        // newest 20 are 55.0..=74.0
        assert_eq!(averages.date, day("2024-01-25"));
        assert_eq!(averages.ma_20, Some(64.5));
        assert_eq!(averages.ma_50, None);
    }

    #[tokio::test]
    async fn test_moving_averages_empty_is_not_found() {
        let result = service().moving_averages().await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sync
    // ─────────────────────────────────────────────────────────────────────────

    fn quotes(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn test_sync_stores_feed_rates_with_dollar_index() {
        let mut series = DailyRates::new();
        series.insert(day("2024-03-04"), quotes(&[("PHP", 56.0), ("EUR", 0.8)]));
        series.insert(day("2024-03-05"), quotes(&[("PHP", 56.2)]));
        series.insert(day("2024-03-06"), quotes(&[("EUR", 0.9)]));
        let feed = Arc::new(MockFeed::with_series(series));
        let service = FxService::new(MockRepo::default(), feed.clone());

        let stored = service
            .sync_rates_until(SyncPeriod::OneWeek, day("2024-03-08"))
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].dollar_index, Some(125.0));
        assert_eq!(stored[1].dollar_index, None);
        assert_eq!(
            service.latest_rate().await.unwrap().date,
            day("2024-03-05")
        );
        assert_eq!(
            feed.requested.lock().unwrap().as_slice(),
            &[(day("2024-03-01"), day("2024-03-08"))]
        );
    }

    #[tokio::test]
    async fn test_sync_with_empty_feed_stores_nothing() {
        let stored = service()
            .sync_rates_until(SyncPeriod::OneDay, day("2024-03-09"))
            .await
            .unwrap();

        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_sync_feed_failure_is_upstream_error() {
        let service = FxService::new(MockRepo::default(), Arc::new(MockFeed::failing()));

        let result = service.sync_rates(SyncPeriod::OneMonth).await;

        assert!(matches!(result, Err(AppError::Upstream(_))));
        assert!(service.repo().latest_rate().await.unwrap().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ledger
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_add_transaction_computes_peso_amount() {
        let tx = service()
            .add_transaction(tx_req(TransactionType::Buy, 100.0, 56.1))
            .await
            .unwrap();

        assert_eq!(tx.transaction_type, TransactionType::Buy);
        assert!((tx.amount_php - 5610.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_add_transaction_non_positive_amount_rejected() {
        let service = service();

        let result = service
            .add_transaction(tx_req(TransactionType::Sell, 0.0, 56.1))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.list_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_transactions_in_insertion_order() {
        let service = service();

        let first = service
            .add_transaction(tx_req(TransactionType::Buy, 100.0, 56.0))
            .await
            .unwrap();
        let second = service
            .add_transaction(tx_req(TransactionType::Sell, 40.0, 56.5))
            .await
            .unwrap();

        let listed = service.list_transactions().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[tokio::test]
    async fn test_sync_skips_unusable_quote_and_keeps_the_rest() {
        let mut series = DailyRates::new();
        series.insert(day("2024-03-04"), quotes(&[("PHP", 56.0), ("EUR", 0.8)]));
        series.insert(day("2024-03-05"), quotes(&[("PHP", 0.0), ("EUR", 0.8)]));
        let service = FxService::new(
            MockRepo::default(),
            Arc::new(MockFeed::with_series(series)),
        );

        let stored = service
            .sync_rates_until(SyncPeriod::OneWeek, day("2024-03-08"))
            .await
            .unwrap();

        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, day("2024-03-04"));
        assert_eq!(
            service.latest_rate().await.unwrap().date,
            day("2024-03-04")
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ledger summary
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_ledger_summary_empty() {
        let summary = service().ledger_summary().await.unwrap();

        assert_eq!(summary.total_bought_usd, 0.0);
        assert_eq!(summary.average_buy_rate, None);
        assert_eq!(summary.average_sell_rate, None);
        assert_eq!(summary.realized_profit_php, 0.0);
        assert!(summary.monthly_volume.is_empty());
    }

    #[tokio::test]
    async fn test_ledger_summary_without_sells() {
        let service = service();
        service
            .add_transaction(tx_req(TransactionType::Buy, 100.0, 56.0))
            .await
            .unwrap();

        let summary = service.ledger_summary().await.unwrap();

        assert_eq!(summary.total_sold_usd, 0.0);
        assert_eq!(summary.average_sell_rate, None);
        assert_eq!(summary.average_buy_rate, Some(56.0));
        assert_eq!(summary.current_position_usd, 100.0);
        assert_eq!(summary.realized_profit_php, 0.0);
        assert!(summary.realized_profit_php.is_finite());
    }

    #[tokio::test]
    async fn test_ledger_summary_realized_profit() {
        let service = service();
        service
            .add_transaction(tx_req(TransactionType::Buy, 100.0, 56.0))
            .await
            .unwrap();
        service
            .add_transaction(tx_req(TransactionType::Sell, 40.0, 57.0))
            .await
            .unwrap();

        let summary = service.ledger_summary().await.unwrap();

        // 40 * 57 - 40 * 56
        assert_eq!(summary.realized_profit_php, 40.0);
        assert_eq!(summary.current_position_usd, 60.0);
        assert_eq!(summary.monthly_volume.len(), 1);
        assert_eq!(summary.monthly_volume[0].month, "2024-01");
        assert_eq!(summary.monthly_volume[0].volume_usd, 140.0);
    }
}
