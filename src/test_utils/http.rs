use std::sync::Arc;

use axum_test::TestServer;

use crate::{
    AppState, build_router,
    pagination::PaginationConfig,
    transaction::{Transaction, TransactionSource},
};

use super::source::CountingTransactionSource;

pub(crate) fn test_server_with_source(source: impl TransactionSource + 'static) -> TestServer {
    let state = AppState::new(Arc::new(source), PaginationConfig::default());

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// A test server whose upstream always returns `transactions`.
pub(crate) fn test_server(transactions: Vec<Transaction>) -> TestServer {
    test_server_with_source(CountingTransactionSource::new(transactions))
}

/// A test server whose upstream is unreachable.
pub(crate) fn failing_test_server() -> TestServer {
    test_server_with_source(CountingTransactionSource::failing())
}
