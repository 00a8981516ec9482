//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fxdesk_types::{
        ExchangeRate, LedgerRepository, RateRepository, Transaction, TransactionType,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_latest_rate_empty() {
        let repo = setup_repo().await;

        let latest = repo.latest_rate().await.unwrap();

        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn test_add_then_latest() {
        let repo = setup_repo().await;

        repo.upsert_rate(ExchangeRate::new(day("2024-01-01"), 55.5, None).unwrap())
            .await
            .unwrap();
        repo.upsert_rate(ExchangeRate::new(day("2024-01-03"), 55.8, Some(109.1)).unwrap())
            .await
            .unwrap();
        repo.upsert_rate(ExchangeRate::new(day("2024-01-02"), 55.6, None).unwrap())
            .await
            .unwrap();

        let latest = repo.latest_rate().await.unwrap().unwrap();

        assert_eq!(latest.date, day("2024-01-03"));
        assert_eq!(latest.usd_php_rate, 55.8);
        assert_eq!(latest.dollar_index, Some(109.1));
    }

    #[tokio::test]
    async fn test_upsert_same_date_overwrites() {
        let repo = setup_repo().await;

        repo.upsert_rate(ExchangeRate::new(day("2024-01-01"), 55.5, Some(100.0)).unwrap())
            .await
            .unwrap();
        repo.upsert_rate(ExchangeRate::new(day("2024-01-01"), 56.0, None).unwrap())
            .await
            .unwrap();

        let rates = repo.list_rates(None, None).await.unwrap();

        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].usd_php_rate, 56.0);
        assert_eq!(rates[0].dollar_index, None);
    }

    #[tokio::test]
    async fn test_list_rates_with_bounds() {
        let repo = setup_repo().await;

        let batch = ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]
            .iter()
            .enumerate()
            .map(|(i, d)| ExchangeRate::new(day(d), 55.0 + i as f64, None).unwrap())
            .collect();
        repo.upsert_rates(batch).await.unwrap();

        let rates = repo
            .list_rates(Some(day("2024-01-02")), Some(day("2024-01-03")))
            .await
            .unwrap();

        let dates: Vec<_> = rates.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day("2024-01-02"), day("2024-01-03")]);

        let open_ended = repo.list_rates(None, Some(day("2024-01-01"))).await.unwrap();
        assert_eq!(open_ended.len(), 1);
    }

    #[tokio::test]
    async fn test_recent_rates_newest_first() {
        let repo = setup_repo().await;

        for (d, v) in [("2024-01-01", 55.0), ("2024-01-02", 56.0), ("2024-01-03", 57.0)] {
            repo.upsert_rate(ExchangeRate::new(day(d), v, None).unwrap())
                .await
                .unwrap();
        }

        let recent = repo.recent_rates(2).await.unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, day("2024-01-03"));
        assert_eq!(recent[1].date, day("2024-01-02"));
    }

    #[tokio::test]
    async fn test_append_and_list_transactions_in_order() {
        let repo = setup_repo().await;

        let first = Transaction::new(
            day("2024-01-05"),
            TransactionType::Buy,
            100.0,
            56.0,
            Some("first".to_string()),
        )
        .unwrap();
        let second =
            Transaction::new(day("2024-01-02"), TransactionType::Sell, 40.0, 55.5, None).unwrap();

        repo.append_transaction(first.clone()).await.unwrap();
        repo.append_transaction(second.clone()).await.unwrap();

        let listed = repo.list_transactions().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[0].notes.as_deref(), Some("first"));
        assert_eq!(listed[0].amount_php, 5600.0);
        assert_eq!(listed[1].id, second.id);
        assert_eq!(listed[1].transaction_type, TransactionType::Sell);
        assert_eq!(listed[1].transaction_date, day("2024-01-02"));
    }
}
