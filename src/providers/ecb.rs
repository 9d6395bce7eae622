//! ECB euro foreign-exchange reference rate provider.
//!
//! The ECB publishes two XML documents: the latest publishing day
//! (`eurofxref-daily.xml`) and the full newest-first history
//! (`eurofxref-hist.xml`). Both nest `Cube` elements: an outer wrapper, one
//! `Cube time='YYYY-MM-DD'` per day, and one `Cube currency='..' rate='..'`
//! per quoted currency. Rates are quoted against EUR only.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::cache::FeedCache;
use crate::core::error::{FIXED_BASE, RatesError};
use crate::core::feed::FeedId;
use crate::core::provider::RateProvider;
use crate::core::snapshot::RateSnapshot;

pub const DEFAULT_BASE_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref";

#[derive(Deserialize, Debug)]
struct XmlEnvelope {
    #[serde(rename = "Cube")]
    cube: XmlOuterCube,
}

#[derive(Deserialize, Debug)]
struct XmlOuterCube {
    #[serde(rename = "$value", default)]
    days: Vec<XmlDayCube>,
}

#[derive(Deserialize, Debug)]
struct XmlDayCube {
    time: String,
    #[serde(rename = "$value", default)]
    rates: Vec<XmlRateCube>,
}

// Attributes stay as strings here; bad values are dropped during
// extraction instead of failing the whole document.
#[derive(Deserialize, Debug)]
struct XmlRateCube {
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    rate: Option<String>,
}

/// One published day extracted from a feed. A day with an empty rate map is
/// a placeholder the upstream occasionally emits; day selection treats it
/// as a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDay {
    pub date: NaiveDate,
    pub rates: HashMap<String, f64>,
}

fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedDay>, RatesError> {
    let envelope: XmlEnvelope = serde_xml_rs::from_reader(bytes)
        .map_err(|e| RatesError::MalformedFeed(format!("XML deserialize failed: {e}")))?;

    envelope
        .cube
        .days
        .into_iter()
        .map(|day| {
            let date = NaiveDate::parse_from_str(&day.time, "%Y-%m-%d").map_err(|_| {
                RatesError::MalformedFeed(format!("invalid day date: {:?}", day.time))
            })?;
            let rates = day
                .rates
                .into_iter()
                .filter_map(|cube| {
                    let currency = cube.currency?;
                    let rate: f64 = cube.rate?.parse().ok()?;
                    if !rate.is_finite() || rate <= 0.0 {
                        return None;
                    }
                    Some((currency, rate))
                })
                .collect();
            Ok(FeedDay { date, rates })
        })
        .collect()
}

fn filter_rates(rates: &HashMap<String, f64>, targets: &[String]) -> HashMap<String, f64> {
    rates
        .iter()
        .filter(|(code, _)| targets.is_empty() || targets.iter().any(|t| t == *code))
        .map(|(code, rate)| (code.clone(), *rate))
        .collect()
}

/// Rate provider backed by the ECB reference rate feeds, read through a
/// [`FeedCache`].
pub struct EcbProvider {
    cache: FeedCache,
}

impl EcbProvider {
    pub fn new(cache: FeedCache) -> Self {
        EcbProvider { cache }
    }

    fn ensure_base(&self, base: &str) -> Result<(), RatesError> {
        if base != FIXED_BASE {
            return Err(RatesError::UnsupportedBase {
                requested: base.to_string(),
                supported: FIXED_BASE,
            });
        }
        Ok(())
    }

    async fn fetch_days(&self, feed: FeedId) -> Result<Vec<FeedDay>, RatesError> {
        let bytes = self.cache.get(feed).await?;
        parse_feed(&bytes)
    }
}

#[async_trait]
impl RateProvider for EcbProvider {
    #[instrument(name = "EcbLatest", skip(self, targets))]
    async fn latest(&self, base: &str, targets: &[String]) -> Result<RateSnapshot, RatesError> {
        self.ensure_base(base)?;

        let days = self.fetch_days(FeedId::Daily).await?;
        let day = days.into_iter().next().ok_or_else(|| {
            RatesError::MalformedFeed("daily feed contains no published day".to_string())
        })?;
        debug!("Daily feed published for {}", day.date);

        Ok(RateSnapshot::new(
            base,
            day.date,
            filter_rates(&day.rates, targets),
        ))
    }

    #[instrument(name = "EcbHistorical", skip(self, targets))]
    async fn historical(
        &self,
        date: NaiveDate,
        base: &str,
        targets: &[String],
    ) -> Result<RateSnapshot, RatesError> {
        self.ensure_base(base)?;

        let days = self.fetch_days(FeedId::HistoricalSeries).await?;

        // Round up to the next day rates were actually published for,
        // skipping placeholder days with empty rate sets.
        let day = days
            .into_iter()
            .filter(|day| day.date >= date && !day.rates.is_empty())
            .min_by_key(|day| day.date)
            .ok_or(RatesError::NoData(date))?;
        debug!("Resolved {} to published day {}", date, day.date);

        Ok(RateSnapshot::new(
            base,
            day.date,
            filter_rates(&day.rates, targets),
        ))
    }
}
