//! Tick filter plugin implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use debut_plugin::prelude::*;
use plugin_stats::{StatsApi, StatsPlugin};

/// Vetoes ticks with volume at or below `min_volume`.
#[derive(Debug, Default)]
pub struct TickFilterPlugin {
    min_volume: f64,
    filtered: AtomicU64,
}

impl TickFilterPlugin {
    /// Name the plugin registers under.
    pub const NAME: &'static str = "tick-filter";

    /// Creates a filter vetoing ticks with volume at or below `min_volume`.
    pub fn new(min_volume: f64) -> Self {
        Self {
            min_volume,
            filtered: AtomicU64::new(0),
        }
    }

    /// Number of ticks suppressed so far.
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Plugin for TickFilterPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn registered_hooks(&self) -> Vec<PluginHook> {
        vec![PluginHook::OnTick]
    }

    async fn on_tick(&self, ctx: &PluginCtx, tick: &Candle) -> AppResult<HookAction> {
        if tick.v > self.min_volume {
            return Ok(HookAction::Continue);
        }

        self.filtered.fetch_add(1, Ordering::Relaxed);
        if let Some(stats) = ctx.find_api::<StatsApi>(StatsPlugin::NAME) {
            stats.record_filtered();
        }

        debug!(time = tick.time, volume = tick.v, "Tick filtered");
        Ok(HookAction::skip(format!(
            "volume {} <= {}",
            tick.v, self.min_volume
        )))
    }
}
