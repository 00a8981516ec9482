//! Transaction domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ensure_positive;
use crate::error::DomainError;

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TransactionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// USD bought with pesos
    #[serde(alias = "buy")]
    Buy,
    /// USD sold for pesos
    #[serde(alias = "sell")]
    Sell,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "BUY"),
            TransactionType::Sell => write!(f, "SELL"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            other => Err(DomainError::ValidationError(format!(
                "Unknown transaction type: {}",
                other
            ))),
        }
    }
}

/// A recorded cash movement denominated in USD at a given rate.
///
/// Transactions form an append-only log: they are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Day the movement happened
    #[schema(example = "2024-01-02")]
    pub transaction_date: NaiveDate,
    /// BUY or SELL
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount in US dollars
    #[schema(example = 100.0)]
    pub amount_usd: f64,
    /// Pesos per dollar applied to this movement
    #[schema(example = 56.1)]
    pub rate: f64,
    /// Peso equivalent, always `amount_usd * rate`
    #[schema(example = 5610.0)]
    pub amount_php: f64,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the record was stored
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new, validated transaction.
    ///
    /// # Validation
    /// - `amount_usd` and `rate` must be finite and positive
    pub fn new(
        transaction_date: NaiveDate,
        transaction_type: TransactionType,
        amount_usd: f64,
        rate: f64,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        let amount_usd = ensure_positive("amount_usd", amount_usd)?;
        let rate = ensure_positive("rate", rate)?;
        let amount_php = amount_usd * rate;
        if !amount_php.is_finite() {
            return Err(DomainError::NotFinite("amount_php"));
        }

        Ok(Self {
            id: TransactionId::new(),
            transaction_date,
            transaction_type,
            amount_usd,
            rate,
            amount_php,
            notes,
            created_at: Utc::now(),
        })
    }

    /// Reconstructs a transaction from database fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TransactionId,
        transaction_date: NaiveDate,
        transaction_type: TransactionType,
        amount_usd: f64,
        rate: f64,
        amount_php: f64,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            transaction_date,
            transaction_type,
            amount_usd,
            rate,
            amount_php,
            notes,
            created_at,
        }
    }
}
