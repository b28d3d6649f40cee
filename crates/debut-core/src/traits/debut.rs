//! Boundary of the strategy engine that owns a plugin driver.

use crate::types::{Candle, ExecutedOrder};

/// Read access to the running strategy, handed to plugins through their
/// runtime context.
///
/// The engine itself lives outside this workspace; plugins only get to
/// inspect its state.
pub trait DebutCore: Send + Sync {
    /// Instrument ticker the strategy trades.
    fn ticker(&self) -> &str;

    /// Currently open orders, oldest first.
    fn orders(&self) -> Vec<ExecutedOrder>;

    /// Last closed candle, if any was processed yet.
    fn current_candle(&self) -> Option<Candle>;

    /// Whether orders are simulated.
    fn is_sandbox(&self) -> bool {
        false
    }
}
