//! Core business logic abstractions

pub mod cache;
pub mod error;
pub mod feed;
pub mod log;
pub mod provider;
pub mod snapshot;

// Re-export main types for cleaner imports
pub use cache::{FeedCache, FeedStore, StoredFeed};
pub use error::{FIXED_BASE, RatesError};
pub use feed::{FeedFetcher, FeedId};
pub use provider::RateProvider;
pub use snapshot::RateSnapshot;
