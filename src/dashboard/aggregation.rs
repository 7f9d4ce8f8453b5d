//! Sale statistics aggregated over a set of transactions.

use serde::Serialize;

use crate::transaction::Transaction;

/// Totals over the transactions of a month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of the prices of every transaction, sold or not.
    pub total_sale_amount: f64,
    /// The number of transactions that were sold.
    pub total_sold_items: usize,
    /// The number of transactions that were not sold.
    pub total_not_sold_items: usize,
}

/// Aggregates the total sale amount and sold/unsold counts in a single pass.
pub fn compute_statistics(transactions: &[Transaction]) -> SaleStatistics {
    transactions
        .iter()
        .fold(SaleStatistics::default(), |mut statistics, transaction| {
            statistics.total_sale_amount += transaction.price;

            if transaction.sold {
                statistics.total_sold_items += 1;
            } else {
                statistics.total_not_sold_items += 1;
            }

            statistics
        })
}
