//! Upstream daily FX rate feeds.
//!
//! Two adapters implement the [`RateFeed`] port:
//!
//! - [`FrankfurterFeed`] queries the public Frankfurter API (ECB reference
//!   rates) over HTTP.
//! - [`StaticFeed`] serves fixed per-USD rates for every weekday, for local
//!   development and tests where no network is available.
//!
//! # Example
//! ```
//! use rate_feed::StaticFeed;
//! use fxdesk_types::RateFeed;
//!
//! # tokio_test_block(async {
//! let feed = StaticFeed::new();
//! let from = "2024-01-01".parse().unwrap();
//! let to = "2024-01-05".parse().unwrap();
//! let rates = feed.daily_rates(from, to, "USD", &["PHP"]).await.unwrap();
//! assert_eq!(rates.len(), 5);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

mod fixed;
mod frankfurter;

pub use fixed::StaticFeed;
pub use frankfurter::{DEFAULT_BASE_URL, FrankfurterFeed};
pub use fxdesk_types::{DailyRates, FeedError, RateFeed};
