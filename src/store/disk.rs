use crate::core::cache::{FeedStore, StoredFeed};
use crate::core::feed::FeedId;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::{debug, warn};

/// Feed store persisted in a fjall keyspace, so a fresh feed survives
/// across process runs within its freshness window.
pub struct FjallStore {
    keyspace: Keyspace,
    feeds: PartitionHandle,
}

impl FjallStore {
    pub fn new(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let keyspace = fjall::Config::new(path).open()?;
        let feeds = keyspace.open_partition("feeds", PartitionCreateOptions::default())?;
        Ok(FjallStore { keyspace, feeds })
    }
}

#[async_trait]
impl FeedStore for FjallStore {
    async fn get(&self, feed: FeedId) -> Option<StoredFeed> {
        let res: Result<Option<StoredFeed>> = (|| {
            match self.feeds.get(feed.key())? {
                Some(bytes) => {
                    let entry: StoredFeed = serde_json::from_slice(&bytes)?;
                    debug!("Store HIT for feed: {}", feed.key());
                    Ok(Some(entry))
                }
                None => {
                    debug!("Store MISS for feed: {}", feed.key());
                    Ok(None)
                }
            }
        })();

        match res {
            Ok(entry) => entry,
            Err(e) => {
                warn!("FjallStore get error: {}", e);
                None
            }
        }
    }

    async fn put(&self, feed: FeedId, entry: StoredFeed) {
        let res: Result<()> = (|| {
            self.feeds.insert(feed.key(), serde_json::to_vec(&entry)?)?;
            self.keyspace.persist(PersistMode::SyncAll)?;
            debug!("Store PUT for feed: {}", feed.key());
            Ok(())
        })();
        if let Err(e) = res {
            warn!("FjallStore put error: {}", e);
        }
    }
}
