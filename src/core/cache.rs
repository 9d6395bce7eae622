//! Time-based feed cache over an injected store and fetch capability.

use crate::core::error::RatesError;
use crate::core::feed::{FeedFetcher, FeedId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;

pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(3600);

/// One stored feed document and the wall-clock instant it was fetched.
/// Staleness is judged by age at read time; entries are overwritten, never
/// evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFeed {
    pub content: Vec<u8>,
    pub fetched_at: SystemTime,
}

impl StoredFeed {
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.fetched_at).unwrap_or(Duration::ZERO)
    }
}

/// Local store capability holding at most one entry per feed.
#[async_trait::async_trait]
pub trait FeedStore: Send + Sync {
    async fn get(&self, feed: FeedId) -> Option<StoredFeed>;
    async fn put(&self, feed: FeedId, entry: StoredFeed);
}

/// Serves feed bytes, fetching upstream only when the stored copy is
/// missing, empty, or older than the freshness window.
pub struct FeedCache {
    base_url: String,
    store: Arc<dyn FeedStore>,
    fetcher: Arc<dyn FeedFetcher>,
    freshness: Duration,
}

impl FeedCache {
    pub fn new(base_url: &str, store: Arc<dyn FeedStore>, fetcher: Arc<dyn FeedFetcher>) -> Self {
        FeedCache {
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            fetcher,
            freshness: DEFAULT_FRESHNESS,
        }
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Returns feed bytes, from the store when fresh, otherwise fetched and
    /// written back. A failed fetch propagates without touching the store,
    /// so a stale entry is never replaced by a truncated one.
    pub async fn get(&self, feed: FeedId) -> Result<Vec<u8>, RatesError> {
        if let Some(entry) = self.store.get(feed).await {
            if !entry.content.is_empty() && entry.age(SystemTime::now()) < self.freshness {
                debug!("Feed cache HIT for {}", feed.key());
                return Ok(entry.content);
            }
        }
        debug!("Feed cache MISS for {}", feed.key());

        let url = format!("{}{}", self.base_url, feed.path());
        let content = self.fetcher.fetch_url(&url).await?;
        self.store
            .put(
                feed,
                StoredFeed {
                    content: content.clone(),
                    fetched_at: SystemTime::now(),
                },
            )
            .await;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockFetcher {
        call_count: AtomicUsize,
        response: Result<Vec<u8>, String>,
    }

    impl MockFetcher {
        fn ok(body: &[u8]) -> Self {
            MockFetcher {
                call_count: AtomicUsize::new(0),
                response: Ok(body.to_vec()),
            }
        }

        fn failing(message: &str) -> Self {
            MockFetcher {
                call_count: AtomicUsize::new(0),
                response: Err(message.to_string()),
            }
        }
    }

    #[async_trait::async_trait]
    impl FeedFetcher for MockFetcher {
        async fn fetch_url(&self, _url: &str) -> Result<Vec<u8>, RatesError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(RatesError::Connection)
        }
    }

    #[tokio::test]
    async fn test_fresh_entry_skips_fetch() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::ok(b"<feed/>"));
        let cache = FeedCache::new(
            "http://example.com",
            Arc::clone(&store) as Arc<dyn FeedStore>,
            Arc::clone(&fetcher) as Arc<dyn FeedFetcher>,
        );

        // First call fetches and writes back
        assert_eq!(cache.get(FeedId::Daily).await.unwrap(), b"<feed/>");
        assert_eq!(fetcher.call_count.load(Ordering::SeqCst), 1);

        // Second call within the window is served from the store
        assert_eq!(cache.get(FeedId::Daily).await.unwrap(), b"<feed/>");
        assert_eq!(fetcher.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_refetches() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::ok(b"<feed/>"));
        let cache = FeedCache::new("http://example.com", store, Arc::clone(&fetcher) as Arc<dyn FeedFetcher>)
            .with_freshness(Duration::ZERO);

        cache.get(FeedId::Daily).await.unwrap();
        cache.get(FeedId::Daily).await.unwrap();
        assert_eq!(fetcher.call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_stored_content_refetches() {
        let store = Arc::new(MemoryStore::new());
        store
            .put(
                FeedId::Daily,
                StoredFeed {
                    content: Vec::new(),
                    fetched_at: SystemTime::now(),
                },
            )
            .await;
        let fetcher = Arc::new(MockFetcher::ok(b"<feed/>"));
        let cache = FeedCache::new("http://example.com", store, Arc::clone(&fetcher) as Arc<dyn FeedFetcher>);

        assert_eq!(cache.get(FeedId::Daily).await.unwrap(), b"<feed/>");
        assert_eq!(fetcher.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::failing("timed out"));
        let cache = FeedCache::new("http://example.com", Arc::clone(&store) as Arc<dyn FeedStore>, fetcher);

        let err = cache.get(FeedId::Daily).await.unwrap_err();
        assert!(matches!(err, RatesError::Connection(_)));
        assert!(store.get(FeedId::Daily).await.is_none());
    }

    #[tokio::test]
    async fn test_feeds_are_cached_independently() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::ok(b"<feed/>"));
        let cache = FeedCache::new("http://example.com", store, Arc::clone(&fetcher) as Arc<dyn FeedFetcher>);

        cache.get(FeedId::Daily).await.unwrap();
        cache.get(FeedId::HistoricalSeries).await.unwrap();
        assert_eq!(fetcher.call_count.load(Ordering::SeqCst), 2);
    }
}
