#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod source;

pub(crate) use http::{failing_test_server, test_server, test_server_with_source};
pub(crate) use source::{CountingTransactionSource, test_transaction};
