//! Time-boxed memoization of transaction snapshots.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::Error;

use super::{models::Snapshot, source::TransactionSource};

struct CachedSnapshot {
    snapshot: Snapshot,
    fetched_at: Instant,
}

/// Wraps another [TransactionSource] and reuses its last snapshot until `ttl`
/// has passed.
///
/// A `ttl` of zero disables caching, every call goes to the inner source.
/// Failed fetches are never cached. Concurrent callers that miss the cache
/// wait for a single fetch rather than each fetching.
pub struct CachedTransactionSource<S> {
    inner: S,
    ttl: Duration,
    cached: Mutex<Option<CachedSnapshot>>,
}

impl<S> CachedTransactionSource<S> {
    /// Cache snapshots from `inner` for `ttl`.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// How long a snapshot is reused for.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[async_trait]
impl<S: TransactionSource> TransactionSource for CachedTransactionSource<S> {
    async fn fetch(&self) -> Result<Snapshot, Error> {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
        {
            tracing::debug!(
                "Snapshot cache hit, age {:?} of {:?}",
                entry.fetched_at.elapsed(),
                self.ttl
            );
            return Ok(entry.snapshot.clone());
        }

        tracing::debug!("Snapshot cache miss, fetching from upstream");
        let snapshot = self.inner.fetch().await?;

        *cached = Some(CachedSnapshot {
            snapshot: snapshot.clone(),
            fetched_at: Instant::now(),
        });

        Ok(snapshot)
    }
}
