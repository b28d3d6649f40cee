//! Capability object published by the stats plugin.

use parking_lot::Mutex;
use serde::Serialize;

use debut_core::types::Candle;

/// Point-in-time copy of the collected statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Closed candles seen.
    pub candles: u64,
    /// Candles that closed above their open.
    pub bullish: u64,
    /// Summed candle volume.
    pub volume: f64,
    /// Highest high.
    pub high: Option<f64>,
    /// Lowest low.
    pub low: Option<f64>,
    /// Time of the first candle, ms.
    pub first_time: Option<i64>,
    /// Time of the last candle, ms.
    pub last_time: Option<i64>,
    /// Ticks suppressed by other plugins.
    pub filtered_ticks: u64,
    /// Orders opened.
    pub opened: u64,
    /// Orders closed.
    pub closed: u64,
}

/// Shared statistics, readable by the host and by other plugins.
#[derive(Debug, Default)]
pub struct StatsApi {
    state: Mutex<StatsSnapshot>,
}

impl StatsApi {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current totals.
    pub fn snapshot(&self) -> StatsSnapshot {
        self.state.lock().clone()
    }

    /// Records a tick that was skipped before reaching the strategy.
    pub fn record_filtered(&self) {
        self.state.lock().filtered_ticks += 1;
    }

    pub(crate) fn record_candle(&self, candle: &Candle) {
        let mut state = self.state.lock();

        state.candles += 1;
        if candle.is_bullish() {
            state.bullish += 1;
        }
        state.volume += candle.v;
        state.high = Some(state.high.map_or(candle.h, |h| h.max(candle.h)));
        state.low = Some(state.low.map_or(candle.l, |l| l.min(candle.l)));
        state.first_time.get_or_insert(candle.time);
        state.last_time = Some(candle.time);
    }

    pub(crate) fn record_open(&self) {
        self.state.lock().opened += 1;
    }

    pub(crate) fn record_close(&self) {
        self.state.lock().closed += 1;
    }

    pub(crate) fn reset(&self) {
        *self.state.lock() = StatsSnapshot::default();
    }
}
