//! Normalized rate snapshot returned by every query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rates for one published day, quoted against a single base currency.
///
/// Built once by a provider as the terminal output of a query. The base
/// currency is never stored in the rate map; its implicit rate of 1.0 is
/// answered by [`RateSnapshot::rate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSnapshot {
    base: String,
    date: NaiveDate,
    rates: HashMap<String, f64>,
    converted: Option<HashMap<String, f64>>,
}

impl RateSnapshot {
    pub fn new(base: &str, date: NaiveDate, mut rates: HashMap<String, f64>) -> Self {
        rates.remove(base);
        RateSnapshot {
            base: base.to_string(),
            date,
            rates,
            converted: None,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rates(&self) -> &HashMap<String, f64> {
        &self.rates
    }

    /// Rate for a single currency code. The base code always answers 1.0;
    /// codes absent from the snapshot answer `None`.
    pub fn rate(&self, code: &str) -> Option<f64> {
        if code == self.base {
            return Some(1.0);
        }
        self.rates.get(code).copied()
    }

    /// Converted amounts attached by a caller-side conversion step.
    /// Falls back to the raw rates when never set.
    pub fn converted(&self) -> &HashMap<String, f64> {
        self.converted.as_ref().unwrap_or(&self.rates)
    }

    pub fn set_converted(&mut self, converted: HashMap<String, f64>) {
        self.converted = Some(converted);
    }
}
