//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{pagination::PaginationConfig, transaction::TransactionSource};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// Where every request gets its snapshot of transactions from.
    pub transaction_source: Arc<dyn TransactionSource>,

    /// The config that controls how to page the product listing.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] that reads transactions from `transaction_source`.
    pub fn new(
        transaction_source: Arc<dyn TransactionSource>,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            transaction_source,
            pagination_config,
        }
    }
}
