//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fxdesk_types::domain::{
    ExchangeRate, LedgerSummary, MonthlyVolume, MovingAverages, SyncPeriod, Transaction,
    TransactionId, TransactionType,
};
use fxdesk_types::dto::{
    CreateRateRequest, CreateTransactionRequest, RateRangeQuery, SyncRatesQuery,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Record the rate for a day (replaces any existing record for that date)
#[utoipa::path(
    post,
    path = "/api/rates",
    tag = "rates",
    request_body = CreateRateRequest,
    responses(
        (status = 201, description = "Rate stored", body = ExchangeRate),
        (status = 422, description = "Missing, malformed or non-positive fields")
    )
)]
async fn create_rate() {}

/// List rates within optional inclusive date bounds, oldest first
#[utoipa::path(
    get,
    path = "/api/rates",
    tag = "rates",
    params(RateRangeQuery),
    responses(
        (status = 200, description = "Rates in range", body = Vec<ExchangeRate>),
        (status = 422, description = "Malformed date or inverted range")
    )
)]
async fn list_rates() {}

/// Rate with the most recent date
#[utoipa::path(
    get,
    path = "/api/rates/latest",
    tag = "rates",
    responses(
        (status = 200, description = "Latest rate", body = ExchangeRate),
        (status = 404, description = "No rate recorded yet")
    )
)]
async fn latest_rate() {}

/// 20- and 50-record moving averages at the latest date
#[utoipa::path(
    get,
    path = "/api/rates/moving-averages",
    tag = "rates",
    responses(
        (status = 200, description = "Moving averages; null when the window is not yet filled", body = MovingAverages),
        (status = 404, description = "No rate recorded yet")
    )
)]
async fn moving_averages() {}

/// Pull a period of daily rates from the upstream feed
#[utoipa::path(
    post,
    path = "/api/rates/sync",
    tag = "rates",
    params(SyncRatesQuery),
    responses(
        (status = 200, description = "Rates stored from the feed", body = Vec<ExchangeRate>),
        (status = 422, description = "Unknown period"),
        (status = 502, description = "Upstream feed unavailable")
    )
)]
async fn sync_rates() {}

/// Record a buy or sell of US dollars
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = Transaction),
        (status = 422, description = "Missing, malformed or non-positive fields")
    )
)]
async fn create_transaction() {}

/// List every transaction in insertion order
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All transactions", body = Vec<Transaction>)
    )
)]
async fn list_transactions() {}

/// Totals, average buy/sell rates, position, realized P/L and monthly volume
#[utoipa::path(
    get,
    path = "/api/transactions/summary",
    tag = "transactions",
    responses(
        (status = 200, description = "Ledger summary; average rates are null without matching trades", body = LedgerSummary)
    )
)]
async fn ledger_summary() {}

/// OpenAPI documentation for the fxdesk API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "fxdesk API",
        version = "1.0.0",
        description = "Daily USD/PHP exchange-rate store and USD cash transaction ledger.\n\nRates are keyed by calendar date; posting a rate for an existing date replaces it. Transactions are append-only and listed in the order they were recorded.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_rate,
        list_rates,
        latest_rate,
        moving_averages,
        sync_rates,
        create_transaction,
        list_transactions,
        ledger_summary,
    ),
    components(
        schemas(
            ExchangeRate,
            MovingAverages,
            SyncPeriod,
            Transaction,
            TransactionId,
            TransactionType,
            LedgerSummary,
            MonthlyVolume,
            CreateRateRequest,
            CreateTransactionRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Daily exchange-rate store"),
        (name = "transactions", description = "USD cash transaction ledger"),
    )
)]
pub struct ApiDoc;
