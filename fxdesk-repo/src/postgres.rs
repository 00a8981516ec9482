//! PostgreSQL store adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use fxdesk_types::{ExchangeRate, LedgerRepository, RateRepository, RepoError, Transaction};

use crate::types::{DbRate, DbTransaction, RATE_COLUMNS, TRANSACTION_COLUMNS};

const UPSERT_RATE: &str = r#"INSERT INTO exchange_rates (date, usd_php_rate, dollar_index, updated_at)
    VALUES ($1, $2, $3, NOW())
    ON CONFLICT (date) DO UPDATE SET
        usd_php_rate = EXCLUDED.usd_php_rate,
        dollar_index = EXCLUDED.dollar_index,
        updated_at = NOW()"#;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_fx_tables_pg.sql"),
        "0001",
    )
    .await?;

    tracing::debug!("postgres schema ready");
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate store
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateRepository for PostgresRepo {
    async fn upsert_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate, RepoError> {
        sqlx::query(UPSERT_RATE)
            .bind(rate.date)
            .bind(rate.usd_php_rate)
            .bind(rate.dollar_index)
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

        for rate in &rates {
            sqlx::query(UPSERT_RATE)
                .bind(rate.date)
                .bind(rate.usd_php_rate)
                .bind(rate.dollar_index)
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
             WHERE ($1::date IS NULL OR date >= $1) AND ($2::date IS NULL OR date <= $2)
             ORDER BY date ASC"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(DbRate::into_domain).collect())
    }

    async fn recent_rates(&self, limit: usize) -> Result<Vec<ExchangeRate>, RepoError> {
        let rows: Vec<DbRate> = sqlx::query_as(&format!(
            "SELECT {RATE_COLUMNS} FROM exchange_rates ORDER BY date DESC LIMIT $1"
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
impl LedgerRepository for PostgresRepo {
    async fn append_transaction(&self, tx: Transaction) -> Result<Transaction, RepoError> {
        sqlx::query(
            r#"INSERT INTO transactions (id, transaction_date, transaction_type, amount_usd, rate, amount_php, notes, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
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
