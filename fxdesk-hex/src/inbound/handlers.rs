//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use fxdesk_types::{
    AppError, CreateRateRequest, CreateTransactionRequest, FxRepository, RateRangeQuery,
    SyncRatesQuery,
};

use super::extract::{ValidJson, ValidQuery};
use crate::FxService;

/// Application state shared across handlers.
pub struct AppState<R: FxRepository> {
    pub service: FxService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates
// ─────────────────────────────────────────────────────────────────────────────

/// Record the rate for a day.
#[tracing::instrument(skip(state, req), fields(date = %req.date, usd_php_rate = req.usd_php_rate))]
pub async fn create_rate<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
    ValidJson(req): ValidJson<CreateRateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state.service.add_rate(req).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

/// Latest rate by date.
#[tracing::instrument(skip(state))]
pub async fn latest_rate<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state.service.latest_rate().await?;
    Ok(Json(rate))
}

/// List rates within optional bounds.
#[tracing::instrument(skip(state))]
pub async fn list_rates<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
    ValidQuery(query): ValidQuery<RateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state.service.list_rates(query).await?;
    Ok(Json(rates))
}

/// 20/50-record moving averages.
#[tracing::instrument(skip(state))]
pub async fn moving_averages<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let averages = state.service.moving_averages().await?;
    Ok(Json(averages))
}

/// Pull recent rates from the upstream feed.
#[tracing::instrument(skip(state))]
pub async fn sync_rates<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
    ValidQuery(query): ValidQuery<SyncRatesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state
        .service
        .sync_rates(query.period.unwrap_or_default())
        .await?;
    Ok(Json(rates))
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Record a cash transaction.
#[tracing::instrument(skip(state, req), fields(kind = %req.transaction_type, amount_usd = req.amount_usd))]
pub async fn create_transaction<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
    ValidJson(req): ValidJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx = state.service.add_transaction(req).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// List every transaction.
#[tracing::instrument(skip(state))]
pub async fn list_transactions<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.service.list_transactions().await?;
    Ok(Json(transactions))
}

/// Portfolio summary over the whole ledger.
#[tracing::instrument(skip(state))]
pub async fn ledger_summary<R: FxRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.service.ledger_summary().await?;
    Ok(Json(summary))
}
