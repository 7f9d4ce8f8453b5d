//! Sale transactions and the sources they are fetched from.
//!
//! This module contains:
//! - The `Transaction` model and the validation of upstream records
//! - The `TransactionSource` trait and its HTTP implementation
//! - An optional time-boxed cache for snapshots

mod cache;
mod models;
mod source;

pub use cache::CachedTransactionSource;
pub use models::{SaleDate, Snapshot, Transaction, TransactionId};
pub use source::{DEFAULT_UPSTREAM_URL, HttpTransactionSource, TransactionSource};
