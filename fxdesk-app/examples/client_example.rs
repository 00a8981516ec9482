//! Client example demonstrating the rate store and ledger against a running server.
//!
//! Run with: cargo run -p fxdesk-app --example client_example

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::NaiveDate;
use fxdesk_client::FxClient;
use fxdesk_hex::{FxService, inbound::HttpServer};
use fxdesk_repo::build_repo;
use fxdesk_types::{SyncPeriod, TransactionType};
use rate_feed::StaticFeed;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an ephemeral port and hand the listener to the server
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("fxdesk.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background with an offline feed
    let service = FxService::new(repo, Arc::new(StaticFeed::new().with_daily_drift(1.0)));
    let router = HttpServer::new(service).router();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = FxClient::new(format!("http://{addr}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: rate store
    // ─────────────────────────────────────────────────────────────────────────

    let healthy = client.health().await?;
    println!("✅ Server health: {healthy}");

    let missing = client.latest_rate().await;
    println!("✅ Empty store: {}", missing.unwrap_err());

    let day = |s: &str| s.parse::<NaiveDate>();
    let rate = client.add_rate(day("2024-01-01")?, 55.5, None).await?;
    println!(
        "✅ Recorded {} at {} PHP/USD (dollar index: {:?})",
        rate.date, rate.usd_php_rate, rate.dollar_index
    );

    let corrected = client.add_rate(day("2024-01-01")?, 55.65, Some(102.3)).await?;
    println!(
        "✅ Corrected {} to {} PHP/USD",
        corrected.date, corrected.usd_php_rate
    );

    let synced = client.sync_rates(SyncPeriod::OneMonth).await?;
    println!("✅ Synced {} days from the feed", synced.len());

    let latest = client.latest_rate().await?;
    println!(
        "   Latest: {} at {:.4} (dollar index {:.2})",
        latest.date,
        latest.usd_php_rate,
        latest.dollar_index.unwrap_or_default()
    );

    let averages = client.moving_averages().await?;
    println!(
        "   MA20: {:?}  MA50: {:?}",
        averages.ma_20, averages.ma_50
    );

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: ledger
    // ─────────────────────────────────────────────────────────────────────────

    let buy = client
        .add_transaction(
            day("2024-01-02")?,
            TransactionType::Buy,
            500.0,
            56.1,
            Some("payroll".to_string()),
        )
        .await?;
    println!(
        "✅ Bought ${:.2} for ₱{:.2} (tx={})",
        buy.amount_usd, buy.amount_php, buy.id
    );

    let sell = client
        .add_transaction(day("2024-01-09")?, TransactionType::Sell, 120.0, 56.4, None)
        .await?;
    println!(
        "✅ Sold ${:.2} for ₱{:.2} (tx={})",
        sell.amount_usd, sell.amount_php, sell.id
    );

    let rejected = client
        .add_transaction(day("2024-01-10")?, TransactionType::Buy, -5.0, 56.4, None)
        .await;
    println!("✅ Negative amount rejected: {}", rejected.unwrap_err());

    println!("\n📋 Ledger:");
    for tx in client.list_transactions().await? {
        println!(
            "   - {} {} ${:.2} @ {:.2}",
            tx.transaction_date, tx.transaction_type, tx.amount_usd, tx.rate
        );
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
