//! Free text search over transaction titles and prices.

use crate::transaction::Transaction;

/// A case-insensitive literal substring search.
///
/// The search text is never interpreted as a pattern, so characters like `.`
/// or `(` only match themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Create a search from an optional `search` query parameter.
    ///
    /// Returns `None` when `text` is missing or empty, meaning no filtering.
    pub fn new(text: Option<&str>) -> Option<Self> {
        text.filter(|text| !text.is_empty()).map(|text| Self {
            needle: text.to_lowercase(),
        })
    }

    /// Whether the title or the decimal form of the price of `transaction`
    /// contains the search text, ignoring case.
    ///
    /// Prices are written without a trailing ".0", e.g. 100.0 is "100" and
    /// 329.85 is "329.85".
    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.title.to_lowercase().contains(&self.needle)
            || transaction.price.to_string().contains(&self.needle)
    }
}

/// Keep the transactions that match `query`, preserving order.
///
/// A `None` query keeps every transaction.
pub fn filter_by_search(
    transactions: &[Transaction],
    query: Option<&SearchQuery>,
) -> Vec<Transaction> {
    match query {
        None => transactions.to_vec(),
        Some(query) => transactions
            .iter()
            .filter(|transaction| query.matches(transaction))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{test_utils::test_transaction, transaction::Transaction};

    use super::{SearchQuery, filter_by_search};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            test_transaction(1, "Fjallraven Backpack", 109.95, "clothing", true, "2022-03-01"),
            test_transaction(2, "Mens Casual T-Shirt", 22.3, "clothing", false, "2022-03-02"),
            test_transaction(3, "WD 2TB Hard Drive (USB 3.0)", 64.0, "electronics", true, "2022-03-03"),
            test_transaction(4, "Gold Ring", 100.0, "jewelery", false, "2022-03-04"),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<String> {
        transactions.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn empty_or_missing_search_is_no_op() {
        assert_eq!(SearchQuery::new(None), None);
        assert_eq!(SearchQuery::new(Some("")), None);

        let transactions = sample_transactions();
        assert_eq!(filter_by_search(&transactions, None), transactions);
    }

    #[test]
    fn matches_title_ignoring_case() {
        let transactions = sample_transactions();
        let query = SearchQuery::new(Some("BACKPACK")).unwrap();

        let got = filter_by_search(&transactions, Some(&query));

        assert_eq!(ids(&got), vec!["1"]);
    }

    #[test]
    fn matches_price_text() {
        let transactions = sample_transactions();

        let query = SearchQuery::new(Some("109.9")).unwrap();
        assert_eq!(ids(&filter_by_search(&transactions, Some(&query))), vec!["1"]);

        let query = SearchQuery::new(Some("100")).unwrap();
        assert_eq!(ids(&filter_by_search(&transactions, Some(&query))), vec!["4"]);
    }

    #[test]
    fn whole_number_prices_have_no_decimal_point() {
        let transactions = sample_transactions();
        let query = SearchQuery::new(Some("64.0")).unwrap();

        let got = filter_by_search(&transactions, Some(&query));

        // The price of #3 is written as "64".
        assert!(got.is_empty(), "got {:?}", ids(&got));
    }

    #[test]
    fn pattern_characters_are_literal() {
        let transactions = sample_transactions();

        let query = SearchQuery::new(Some("(usb")).unwrap();
        assert_eq!(ids(&filter_by_search(&transactions, Some(&query))), vec!["3"]);

        let query = SearchQuery::new(Some("b.ck")).unwrap();
        assert!(filter_by_search(&transactions, Some(&query)).is_empty());

        let query = SearchQuery::new(Some("t-shirt")).unwrap();
        assert_eq!(ids(&filter_by_search(&transactions, Some(&query))), vec!["2"]);
    }

    #[test]
    fn searching_twice_is_a_no_op() {
        let transactions = sample_transactions();
        let query = SearchQuery::new(Some("r")).unwrap();

        let once = filter_by_search(&transactions, Some(&query));
        let twice = filter_by_search(&once, Some(&query));

        assert_eq!(once, twice);
    }
}
