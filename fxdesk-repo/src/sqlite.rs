//! SQLite store adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use fxdesk_types::{ExchangeRate, LedgerRepository, RateRepository, RepoError, Transaction};

use crate::types::{DbRate, DbTransaction, RATE_COLUMNS, TRANSACTION_COLUMNS};

const UPSERT_RATE: &str = r#"INSERT INTO exchange_rates (date, usd_php_rate, dollar_index, updated_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (date) DO UPDATE SET
        usd_php_rate = excluded.usd_php_rate,
        dollar_index = excluded.dollar_index,
        updated_at = excluded.updated_at"#;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let ddl = include_str!("../migrations/0001_create_fx_tables.sql");
    for statement in ddl.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration 0001 failed: {}", e))?;
        }
    }
    tracing::debug!("sqlite schema ready");
    Ok(())
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // An in-memory database lives only as long as its connections.
        let pool = if database_url.contains(":memory:") || database_url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };
        run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate store
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateRepository for SqliteRepo {
    async fn upsert_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, RepoError> {
        sqlx::query(UPSERT_RATE)
            .bind(rate.date)
            .bind(rate.usd_php_rate)
            .bind(rate.dollar_index)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rate)
    }

    async fn upsert_rates(&self, rates: Vec<ExchangeRate>) -> Result<Vec<ExchangeRate>, RepoError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        let now = Utc::now();
        for rate in &rates {
            sqlx::query(UPSERT_RATE)
                .bind(rate.date)
                .bind(rate.usd_php_rate)
                .bind(rate.dollar_index)
                .bind(now)
                .execute(&mut *db_tx)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        Ok(rates)
    }

    async fn latest_rate(&self) -> Result<Option<ExchangeRate>, RepoError> {
        let row: Option<DbRate> = sqlx::query_as(&format!(
            "SELECT {RATE_COLUMNS} FROM exchange_rates ORDER BY date DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(DbRate::into_domain))
    }

    async fn list_rates(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExchangeRate>, RepoError> {
        let rows: Vec<DbRate> = sqlx::query_as(&format!(
            "SELECT {RATE_COLUMNS} FROM exchange_rates
             WHERE (? IS NULL OR date >= ?) AND (? IS NULL OR date <= ?)
             ORDER BY date ASC"
        ))
        .bind(from)
        .bind(from)
        .bind(to)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(DbRate::into_domain).collect())
    }

    async fn recent_rates(&self, limit: usize) -> Result<Vec<ExchangeRate>, RepoError> {
        let rows: Vec<DbRate> = sqlx::query_as(&format!(
            "SELECT {RATE_COLUMNS} FROM exchange_rates ORDER BY date DESC LIMIT ?"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(DbRate::into_domain).collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ledger
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl LedgerRepository for SqliteRepo {
    async fn append_transaction(&self, tx: Transaction) -> Result<Transaction, RepoError> {
        sqlx::query(
            r#"INSERT INTO transactions (id, transaction_date, transaction_type, amount_usd, rate, amount_php, notes, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(tx.id.into_uuid())
        .bind(tx.transaction_date)
        .bind(tx.transaction_type.to_string())
        .bind(tx.amount_usd)
        .bind(tx.rate)
        .bind(tx.amount_php)
        .bind(&tx.notes)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(tx)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
        let rows: Vec<DbTransaction> = sqlx::query_as(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbTransaction::into_domain).collect()
    }
}
