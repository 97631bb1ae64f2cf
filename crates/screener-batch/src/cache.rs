//! Time-to-live cache in front of a fundamentals source.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use screener_traits::{FetchResult, FundamentalsRecord, FundamentalsSource, Symbol};
use tracing::debug;

struct CacheEntry {
    record: FundamentalsRecord,
    cached_at: DateTime<Utc>,
}

/// Caches successful fetches for a fixed time-to-live.
///
/// Failures are never cached, so a dropped ticker is retried on the next
/// request. The cache is owned by the caller and lives exactly as long as the
/// wrapper.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entries: DashMap<Symbol, CacheEntry>,
}

impl<S> std::fmt::Debug for CachedSource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSource")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<S> CachedSource<S> {
    /// Wrap `inner`, keeping records for `ttl`.
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: DashMap::new(),
        }
    }

    /// The wrapped source.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Cached record for `symbol` if it is still fresh at `now`.
    pub fn get_fresh(&self, symbol: &str, now: DateTime<Utc>) -> Option<FundamentalsRecord> {
        let entry = self.entries.get(symbol)?;
        if now - entry.cached_at < self.ttl {
            Some(entry.record.clone())
        } else {
            None
        }
    }

    /// Store a record as fetched at `now`.
    pub fn insert(&self, record: FundamentalsRecord, now: DateTime<Utc>) {
        self.entries.insert(
            record.ticker.clone(),
            CacheEntry {
                record,
                cached_at: now,
            },
        );
    }

    /// Forget the record for `symbol`.
    pub fn invalidate(&self, symbol: &str) {
        self.entries.remove(symbol);
    }

    /// Drop entries that are stale at `now`.
    pub fn purge_expired(&self, now: DateTime<Utc>) {
        self.entries.retain(|_, entry| now - entry.cached_at < self.ttl);
    }

    /// Forget everything.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached records, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: FundamentalsSource> FundamentalsSource for CachedSource<S> {
    async fn fetch(&self, symbol: &str) -> FetchResult<FundamentalsRecord> {
        if let Some(record) = self.get_fresh(symbol, Utc::now()) {
            debug!(%symbol, "fundamentals cache hit");
            return Ok(record);
        }

        let record = self.inner.fetch(symbol).await?;
        self.entries.insert(
            symbol.to_string(),
            CacheEntry {
                record: record.clone(),
                cached_at: Utc::now(),
            },
        );
        Ok(record)
    }
}
