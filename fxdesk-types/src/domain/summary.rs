//! Portfolio summary derived from the transaction ledger.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::{Transaction, TransactionType};

/// USD traded in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyVolume {
    /// `YYYY-MM`
    #[schema(example = "2024-01")]
    pub month: String,
    /// Bought plus sold, in US dollars
    pub volume_usd: f64,
}

/// Totals, average rates and realized P/L over every recorded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LedgerSummary {
    /// USD bought
    pub total_bought_usd: f64,
    /// USD sold
    pub total_sold_usd: f64,
    /// Volume-weighted PHP/USD over buys; null with no buys
    pub average_buy_rate: Option<f64>,
    /// Volume-weighted PHP/USD over sells; null with no sells
    pub average_sell_rate: Option<f64>,
    /// USD still held: bought minus sold
    pub current_position_usd: f64,
    /// Pesos received from sells minus their cost at the average buy rate
    pub realized_profit_php: f64,
    /// Per-month USD volume, oldest month first
    pub monthly_volume: Vec<MonthlyVolume>,
}

impl LedgerSummary {
    /// Folds the ledger into a summary. An empty ledger yields all zeros.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (mut bought_usd, mut bought_php) = (0.0, 0.0);
        let (mut sold_usd, mut sold_php) = (0.0, 0.0);
        let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();

        for tx in transactions {
            match tx.transaction_type {
                TransactionType::Buy => {
                    bought_usd += tx.amount_usd;
                    bought_php += tx.amount_php;
                }
                TransactionType::Sell => {
                    sold_usd += tx.amount_usd;
                    sold_php += tx.amount_php;
                }
            }
            let date = tx.transaction_date;
            *months.entry((date.year(), date.month())).or_default() += tx.amount_usd;
        }

        let average_buy_rate = weighted_rate(bought_php, bought_usd);
        let average_sell_rate = weighted_rate(sold_php, sold_usd);
        // Sells without any buys carry no cost basis.
        let cost_basis = sold_usd * average_buy_rate.unwrap_or(0.0);

        Self {
            total_bought_usd: bought_usd,
            total_sold_usd: sold_usd,
            average_buy_rate,
            average_sell_rate,
            current_position_usd: bought_usd - sold_usd,
            realized_profit_php: sold_php - cost_basis,
            monthly_volume: months
                .into_iter()
                .map(|((year, month), volume_usd)| MonthlyVolume {
                    month: format!("{year:04}-{month:02}"),
                    volume_usd,
                })
                .collect(),
        }
    }
}

fn weighted_rate(php: f64, usd: f64) -> Option<f64> {
    (usd > 0.0).then(|| php / usd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, kind: TransactionType, amount_usd: f64, rate: f64) -> Transaction {
        Transaction::new(date.parse().unwrap(), kind, amount_usd, rate, None).unwrap()
    }

    #[test]
    fn test_empty_ledger() {
        let summary = LedgerSummary::from_transactions(&[]);

        assert_eq!(summary.total_bought_usd, 0.0);
        assert_eq!(summary.total_sold_usd, 0.0);
        assert_eq!(summary.average_buy_rate, None);
        assert_eq!(summary.average_sell_rate, None);
        assert_eq!(summary.current_position_usd, 0.0);
        assert_eq!(summary.realized_profit_php, 0.0);
        assert!(summary.monthly_volume.is_empty());
    }

    #[test]
    fn test_buys_only_has_no_sell_rate() {
        let ledger = [
            tx("2024-01-02", TransactionType::Buy, 100.0, 56.0),
            tx("2024-01-20", TransactionType::Buy, 300.0, 58.0),
        ];

        let summary = LedgerSummary::from_transactions(&ledger);

        assert_eq!(summary.total_bought_usd, 400.0);
        assert_eq!(summary.average_buy_rate, Some(57.5));
        assert_eq!(summary.average_sell_rate, None);
        assert_eq!(summary.current_position_usd, 400.0);
        assert_eq!(summary.realized_profit_php, 0.0);
    }

    #[test]
    fn test_realized_profit_against_average_buy_rate() {
        let ledger = [
            tx("2024-01-02", TransactionType::Buy, 100.0, 56.0),
            tx("2024-01-20", TransactionType::Buy, 300.0, 58.0),
            tx("2024-02-05", TransactionType::Sell, 200.0, 59.0),
        ];

        let summary = LedgerSummary::from_transactions(&ledger);

        // 200 * 59 - 200 * 57.5
        assert_eq!(summary.realized_profit_php, 300.0);
        assert_eq!(summary.average_sell_rate, Some(59.0));
        assert_eq!(summary.current_position_usd, 200.0);
        assert_eq!(
            summary.monthly_volume,
            vec![
                MonthlyVolume {
                    month: "2024-01".to_string(),
                    volume_usd: 400.0
                },
                MonthlyVolume {
                    month: "2024-02".to_string(),
                    volume_usd: 200.0
                },
            ]
        );
    }

    #[test]
    fn test_sells_without_buys_have_no_cost_basis() {
        let ledger = [tx("2024-03-01", TransactionType::Sell, 50.0, 56.0)];

        let summary = LedgerSummary::from_transactions(&ledger);

        assert_eq!(summary.average_buy_rate, None);
        assert_eq!(summary.realized_profit_php, 2800.0);
        assert_eq!(summary.current_position_usd, -50.0);
    }

    #[test]
    fn test_months_sorted_across_years() {
        let ledger = [
            tx("2024-01-15", TransactionType::Buy, 10.0, 56.0),
            tx("2023-12-31", TransactionType::Buy, 20.0, 56.0),
        ];

        let months: Vec<_> = LedgerSummary::from_transactions(&ledger)
            .monthly_volume
            .into_iter()
            .map(|m| m.month)
            .collect();

        assert_eq!(months, vec!["2023-12", "2024-01"]);
    }
}
