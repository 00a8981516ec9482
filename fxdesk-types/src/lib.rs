//! # fxdesk Types
//!
//! Domain types and port traits for the exchange-rate and transaction
//! ledger service. This crate has no IO dependencies: only data
//! structures, validation rules, and trait definitions.
//!
//! ## Layout
//!
//! - `domain/` - Exchange rates, transactions, moving averages, ledger
//!   summary, sync periods
//! - `ports/` - Traits that store and feed adapters implement
//! - `dto/` - Request/response shapes for the HTTP boundary
//! - `error/` - Domain, repository, and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

pub use domain::{
    ExchangeRate, LedgerSummary, MonthlyVolume, MovingAverages, SyncPeriod, Transaction,
    TransactionId, TransactionType,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{
    DailyRates, FeedError, FxRepository, LedgerRepository, RateFeed, RateRepository,
};
