//! Configuration loading from environment.

use std::env;
use std::str::FromStr;

use rate_feed::DEFAULT_BASE_URL;

/// Which upstream feed backs `POST /api/rates/sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Frankfurter,
    Static,
}

impl FromStr for FeedKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frankfurter" => Ok(FeedKind::Frankfurter),
            "static" => Ok(FeedKind::Static),
            other => anyhow::bail!("Unknown RATE_FEED: {other}. Supported: frankfurter, static"),
        }
    }
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub rate_limit_per_minute: u32,
    pub rate_feed: FeedKind,
    pub frankfurter_url: String,
    pub json_logs: bool,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = get("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT: {e}"))?;

        let database_url = get("DATABASE_URL").unwrap_or_else(|| "memory://".to_string());

        let rate_limit_per_minute = get("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|| "100".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid RATE_LIMIT_PER_MINUTE: {e}"))?;

        let rate_feed = get("RATE_FEED")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(FeedKind::Frankfurter);

        let frankfurter_url =
            get("FRANKFURTER_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let json_logs = get("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        let otlp_endpoint = get("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.trim().is_empty());

        Ok(Self {
            port,
            database_url,
            rate_limit_per_minute,
            rate_feed,
            frankfurter_url,
            json_logs,
            otlp_endpoint,
        })
    }
}
