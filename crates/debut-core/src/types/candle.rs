//! Candle (OHLCV bar) data structure.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle.
///
/// Ticks are delivered as candles as well: the in-progress bar whose close
/// is the latest traded price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open price.
    pub o: f64,
    /// High price.
    pub h: f64,
    /// Low price.
    pub l: f64,
    /// Close price (last price for ticks).
    pub c: f64,
    /// Volume.
    pub v: f64,
    /// Bar open time, milliseconds since the Unix epoch.
    pub time: i64,
}

impl Candle {
    /// Creates a candle.
    pub fn new(time: i64, o: f64, h: f64, l: f64, c: f64, v: f64) -> Self {
        Self { o, h, l, c, v, time }
    }

    /// Bar open time as a UTC timestamp, `None` if out of range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time).single()
    }

    /// Returns whether the bar closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.c > self.o
    }
}
