//! Data for the price range bar chart and the category pie chart.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::transaction::Transaction;

/// The inclusive upper bound of every price range except the last, which is open ended.
const PRICE_RANGE_UPPER_BOUNDS: [f64; 9] =
    [100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0];

/// The price range labels, in ascending order of price.
pub const PRICE_RANGE_LABELS: [&str; 10] = [
    "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700", "701-800",
    "801-900", "901-above",
];

/// Get the index of the price range that `price` falls into.
///
/// The first range is `[0, 100]` and every later range is `(previous bound,
/// bound]`, so a price of exactly 100 is in "0-100" and 100.5 is in "101-200".
fn price_range_index(price: f64) -> usize {
    PRICE_RANGE_UPPER_BOUNDS
        .iter()
        .position(|&upper_bound| price <= upper_bound)
        .unwrap_or(PRICE_RANGE_UPPER_BOUNDS.len())
}

/// The number of transactions in each of the ten fixed price ranges.
///
/// Serializes to a JSON object with every label present, in ascending order of price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceHistogram {
    counts: [usize; PRICE_RANGE_LABELS.len()],
}

impl PriceHistogram {
    /// The count for the price range with the label `label`, e.g. "101-200".
    pub fn count(&self, label: &str) -> Option<usize> {
        PRICE_RANGE_LABELS
            .iter()
            .position(|&range_label| range_label == label)
            .map(|index| self.counts[index])
    }

    /// Iterate over the labels and counts in ascending order of price.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        PRICE_RANGE_LABELS.into_iter().zip(self.counts.iter().copied())
    }

    /// The sum of the counts over all price ranges.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;

        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }

        map.end()
    }
}

/// Count the transactions in each price range.
pub fn build_price_histogram(transactions: &[Transaction]) -> PriceHistogram {
    let mut histogram = PriceHistogram::default();

    for transaction in transactions {
        histogram.counts[price_range_index(transaction.price)] += 1;
    }

    histogram
}

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// The number of transactions in the category.
    pub count: usize,
}

/// The number of transactions in each category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    /// One entry per category, in the order each category first appears.
    pub categories: Vec<CategoryCount>,
}

/// Count the transactions in each category.
///
/// Categories are listed in the order they first appear in `transactions`,
/// not sorted by name or count.
pub fn count_by_category(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<CategoryCount> = Vec::new();

    for transaction in transactions {
        match positions.get(transaction.category.as_str()) {
            Some(&position) => categories[position].count += 1,
            None => {
                positions.insert(transaction.category.as_str(), categories.len());
                categories.push(CategoryCount {
                    category: transaction.category.clone(),
                    count: 1,
                });
            }
        }
    }

    CategoryBreakdown { categories }
}
