use crate::core::cache::{FeedStore, StoredFeed};
use crate::core::feed::FeedId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory feed store backed by a HashMap. Entries live for the process
/// lifetime only.
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<FeedId, StoredFeed>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedStore for MemoryStore {
    async fn get(&self, feed: FeedId) -> Option<StoredFeed> {
        let store = self.inner.lock().await;
        let entry = store.get(&feed).cloned();
        if entry.is_some() {
            debug!("Store HIT for feed: {}", feed.key());
        } else {
            debug!("Store MISS for feed: {}", feed.key());
        }
        entry
    }

    async fn put(&self, feed: FeedId, entry: StoredFeed) {
        let mut store = self.inner.lock().await;
        debug!("Store PUT for feed: {}", feed.key());
        store.insert(feed, entry);
    }
}
