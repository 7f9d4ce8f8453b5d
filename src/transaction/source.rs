//! Fetching transaction snapshots from the upstream data source.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use crate::Error;

use super::models::{Snapshot, parse_snapshot};

/// The URL of the public sale transactions data set.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Something that can provide the current snapshot of sale transactions.
///
/// Implementations decide their own freshness policy. [HttpTransactionSource]
/// fetches on every call, wrap it in a
/// [CachedTransactionSource](super::CachedTransactionSource) to memoize
/// snapshots.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Get the current snapshot of transactions.
    ///
    /// # Errors
    /// Returns [Error::UpstreamFetch] if the snapshot could not be retrieved,
    /// or [Error::InvalidRecord] if it contained a malformed record.
    async fn fetch(&self) -> Result<Snapshot, Error>;
}

/// Fetches the full snapshot from a remote JSON endpoint on every call.
#[derive(Debug, Clone)]
pub struct HttpTransactionSource {
    client: Client,
    url: String,
}

impl HttpTransactionSource {
    /// Create a source that reads from `url`, giving up on requests that take
    /// longer than `timeout`.
    ///
    /// # Errors
    /// Returns [Error::UpstreamFetch] if the HTTP client could not be created.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|error| {
                Error::UpstreamFetch(format!("could not create HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// The URL that snapshots are fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    async fn fetch(&self) -> Result<Snapshot, Error> {
        let started = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| Error::UpstreamFetch(format!("GET {} failed: {error}", self.url)))
            .inspect_err(|error| {
                tracing::debug!("Fetch failed after {:?}: {error}", started.elapsed())
            })?;

        let body = response
            .bytes()
            .await
            .map_err(|error| {
                Error::UpstreamFetch(format!("could not read body from {}: {error}", self.url))
            })
            .inspect_err(|error| tracing::debug!("{error}"))?;

        let transactions = parse_snapshot(&body)
            .inspect_err(|error| tracing::debug!("Invalid snapshot from {}: {error}", self.url))?;

        tracing::debug!(
            "Fetched {} transactions from {} in {:?}",
            transactions.len(),
            self.url,
            started.elapsed()
        );

        Ok(transactions.into())
    }
}
