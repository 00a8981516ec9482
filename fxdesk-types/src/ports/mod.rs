//! Port traits (interfaces for adapters).
//!
//! The application layer depends on these traits, not on concrete stores or
//! HTTP feeds.

mod feed;
mod repository;

pub use feed::{DailyRates, FeedError, RateFeed};
pub use repository::{FxRepository, LedgerRepository, RateRepository};
