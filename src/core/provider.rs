//! Rate query abstraction.

use crate::core::error::RatesError;
use crate::core::snapshot::RateSnapshot;
use async_trait::async_trait;
use chrono::NaiveDate;

/// A source of reference rates. An empty `targets` slice includes every
/// currency the selected day publishes; unknown codes simply produce no
/// entry.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Rates for the most recent published day.
    async fn latest(&self, base: &str, targets: &[String]) -> Result<RateSnapshot, RatesError>;

    /// Rates for a specific day. When the requested date falls on a
    /// non-publishing day, resolves to the next day rates were actually
    /// published for.
    async fn historical(
        &self,
        date: NaiveDate,
        base: &str,
        targets: &[String],
    ) -> Result<RateSnapshot, RatesError>;
}
