//! Error kinds surfaced by rate queries.

use chrono::NaiveDate;
use thiserror::Error;

/// The base currency every ECB rate is quoted against.
pub const FIXED_BASE: &str = "EUR";

#[derive(Debug, Error)]
pub enum RatesError {
    /// Upstream feed unreachable or returned a transport-level failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Response body did not parse as the expected feed structure.
    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    /// No published day with rates on or after the requested date.
    #[error("no rates published on or after {0}")]
    NoData(NaiveDate),

    /// Caller asked for a base currency other than the feed's fixed base.
    #[error("unsupported base currency: {requested} (rates are published in {supported})")]
    UnsupportedBase {
        requested: String,
        supported: &'static str,
    },
}
