//! Feed identifiers and the fetch capability.

use crate::core::error::RatesError;
use async_trait::async_trait;

/// The two documents the upstream publishes. The key space of the feed
/// cache is exactly these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedId {
    /// Single most-recent publishing day.
    Daily,
    /// Multi-day series covering all published days, newest first.
    HistoricalSeries,
}

impl FeedId {
    /// Stable key used by store backends.
    pub fn key(&self) -> &'static str {
        match self {
            FeedId::Daily => "daily",
            FeedId::HistoricalSeries => "historical-series",
        }
    }

    /// Path of the document under the publisher's base URL.
    pub fn path(&self) -> &'static str {
        match self {
            FeedId::Daily => "/eurofxref-daily.xml",
            FeedId::HistoricalSeries => "/eurofxref-hist.xml",
        }
    }
}

/// Transport capability injected into the feed cache. Owns its own timeout
/// policy; any transport failure surfaces as [`RatesError::Connection`].
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, RatesError>;
}
