//! # fxdesk Client SDK
//!
//! A typed Rust client for the fxdesk rate store and transaction ledger API.

use chrono::NaiveDate;
use fxdesk_types::{
    CreateRateRequest, CreateTransactionRequest, ExchangeRate, LedgerSummary, MovingAverages,
    SyncPeriod, Transaction, TransactionType,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// fxdesk API client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Records the rate for a day, replacing any earlier record for it.
    pub async fn add_rate(
        &self,
        date: NaiveDate,
        usd_php_rate: f64,
        dollar_index: Option<f64>,
    ) -> Result<ExchangeRate, ClientError> {
        let req = CreateRateRequest {
            date,
            usd_php_rate,
            dollar_index,
        };
        self.post("/api/rates", &req).await
    }

    /// Gets the most recent rate.
    pub async fn latest_rate(&self) -> Result<ExchangeRate, ClientError> {
        self.get("/api/rates/latest", &[]).await
    }

    /// Lists rates between optional inclusive bounds, oldest first.
    pub async fn list_rates(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExchangeRate>, ClientError> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        self.get("/api/rates", &query).await
    }

    /// Gets the 20/50-record moving averages.
    pub async fn moving_averages(&self) -> Result<MovingAverages, ClientError> {
        self.get("/api/rates/moving-averages", &[]).await
    }

    /// Asks the server to pull a period of rates from its upstream feed.
    pub async fn sync_rates(&self, period: SyncPeriod) -> Result<Vec<ExchangeRate>, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/rates/sync", self.base_url))
            .query(&[("period", period.to_string())])
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Records a buy or sell of US dollars.
    pub async fn add_transaction(
        &self,
        transaction_date: NaiveDate,
        transaction_type: TransactionType,
        amount_usd: f64,
        rate: f64,
        notes: Option<String>,
    ) -> Result<Transaction, ClientError> {
        let req = CreateTransactionRequest {
            transaction_date,
            transaction_type,
            amount_usd,
            rate,
            notes,
        };
        self.post("/api/transactions", &req).await
    }

    /// Lists every transaction in the order it was recorded.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        self.get("/api/transactions", &[]).await
    }

    /// Totals, average rates, position and realized P/L over the ledger.
    pub async fn ledger_summary(&self) -> Result<LedgerSummary, ClientError> {
        self.get("/api/transactions/summary", &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
