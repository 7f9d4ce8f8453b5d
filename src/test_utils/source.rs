use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    Error,
    transaction::{SaleDate, Snapshot, Transaction, TransactionId, TransactionSource},
};

/// An in-memory [TransactionSource] that records how many times it was fetched.
///
/// Clones share the same fetch count.
#[derive(Clone)]
pub(crate) struct CountingTransactionSource {
    /// `None` makes every fetch fail like an unreachable upstream.
    snapshot: Option<Snapshot>,
    fetch_count: Arc<AtomicUsize>,
}

impl CountingTransactionSource {
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            snapshot: Some(transactions.into()),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            snapshot: None,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSource for CountingTransactionSource {
    async fn fetch(&self) -> Result<Snapshot, Error> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        self.snapshot
            .clone()
            .ok_or_else(|| Error::UpstreamFetch("connection refused".to_owned()))
    }
}

#[track_caller]
pub(crate) fn test_transaction(
    id: i64,
    title: &str,
    price: f64,
    category: &str,
    sold: bool,
    date_of_sale: &str,
) -> Transaction {
    Transaction {
        id: TransactionId::Number(id),
        title: title.to_owned(),
        description: format!("Description of {title}"),
        price,
        category: category.to_owned(),
        sold,
        image: None,
        date_of_sale: SaleDate::parse(date_of_sale).expect("invalid test sale date"),
    }
}
