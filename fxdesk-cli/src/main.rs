//! fxdesk CLI
//!
//! Command-line interface for the fxdesk rate store and transaction ledger.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fxdesk_client::FxClient;
use fxdesk_types::{SyncPeriod, TransactionType};

#[derive(Parser)]
#[command(name = "fxdesk")]
#[command(author, version, about = "fxdesk API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the fxdesk API
    #[arg(long, env = "FXDESK_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange-rate operations
    Rate {
        #[command(subcommand)]
        action: RateCommands,
    },
    /// Transaction ledger operations
    Tx {
        #[command(subcommand)]
        action: TxCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum RateCommands {
    /// Record the USD/PHP rate for a day (replaces an existing record)
    Add {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Pesos per US dollar
        #[arg(long)]
        rate: f64,
        /// Dollar index, if known
        #[arg(long)]
        dollar_index: Option<f64>,
    },
    /// Show the most recent rate
    Latest,
    /// List rates, oldest first
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show the 20/50-day moving averages
    Averages,
    /// Pull recent rates from the server's upstream feed
    Sync {
        /// Look-back period (1D, 1W, 2W, 1M, 3M, 6M, 1Y)
        #[arg(long, default_value = "1D")]
        period: SyncPeriod,
    },
}

#[derive(Subcommand)]
enum TxCommands {
    /// Record a buy or sell of US dollars
    Add {
        /// BUY or SELL
        #[arg(long = "type")]
        kind: TransactionType,
        /// Amount in US dollars
        #[arg(long)]
        amount: f64,
        /// Pesos per dollar applied
        #[arg(long)]
        rate: f64,
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all transactions
    List,
    /// Totals, average rates, position and realized P/L
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Rate { action } => match action {
            RateCommands::Add {
                date,
                rate,
                dollar_index,
            } => {
                let stored = client.add_rate(date, rate, dollar_index).await?;
                println!("{}", serde_json::to_string_pretty(&stored)?);
            }
            RateCommands::Latest => {
                let latest = client.latest_rate().await?;
                println!("{}", serde_json::to_string_pretty(&latest)?);
            }
            RateCommands::List { from, to } => {
                let rates = client.list_rates(from, to).await?;
                println!("{}", serde_json::to_string_pretty(&rates)?);
            }
            RateCommands::Averages => {
                let averages = client.moving_averages().await?;
                println!("{}", serde_json::to_string_pretty(&averages)?);
            }
            RateCommands::Sync { period } => {
                let synced = client.sync_rates(period).await?;
                println!("✓ Synced {} rates ({})", synced.len(), period);
            }
        },

        Commands::Tx { action } => match action {
            TxCommands::Add {
                kind,
                amount,
                rate,
                date,
                notes,
            } => {
                let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
                let tx = client.add_transaction(date, kind, amount, rate, notes).await?;
                println!("{}", serde_json::to_string_pretty(&tx)?);
            }
            TxCommands::List => {
                let transactions = client.list_transactions().await?;
                println!("{}", serde_json::to_string_pretty(&transactions)?);
            }
            TxCommands::Summary => {
                let summary = client.ledger_summary().await?;
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        },
    }

    Ok(())
}
