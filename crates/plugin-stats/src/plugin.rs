//! Stats plugin implementation.

use std::sync::Arc;

use tracing::info;

use debut_plugin::prelude::*;

use crate::api::StatsApi;

/// Collects strategy statistics and publishes them as [`StatsApi`].
#[derive(Debug, Default)]
pub struct StatsPlugin {
    api: Arc<StatsApi>,
}

impl StatsPlugin {
    /// Name the plugin registers under.
    pub const NAME: &'static str = "stats";

    /// Creates the plugin with empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the published statistics.
    pub fn stats(&self) -> Arc<StatsApi> {
        Arc::clone(&self.api)
    }
}

#[async_trait]
impl Plugin for StatsPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn registered_hooks(&self) -> Vec<PluginHook> {
        vec![
            PluginHook::OnInit,
            PluginHook::OnOpen,
            PluginHook::OnClose,
            PluginHook::OnCandle,
            PluginHook::OnDispose,
        ]
    }

    fn api(&self) -> Option<PluginApi> {
        Some(Arc::clone(&self.api) as PluginApi)
    }

    fn on_init(&self, ctx: &PluginCtx) -> AppResult<()> {
        self.api.reset();
        info!(ticker = %ctx.debut().ticker(), "Stats collection started");
        Ok(())
    }

    async fn on_open(&self, _ctx: &PluginCtx, _order: &ExecutedOrder) -> AppResult<()> {
        self.api.record_open();
        Ok(())
    }

    async fn on_close(
        &self,
        _ctx: &PluginCtx,
        _order: &ExecutedOrder,
        _closing: &ExecutedOrder,
    ) -> AppResult<()> {
        self.api.record_close();
        Ok(())
    }

    async fn on_candle(&self, _ctx: &PluginCtx, candle: &Candle) -> AppResult<()> {
        self.api.record_candle(candle);
        Ok(())
    }

    async fn on_dispose(&self, ctx: &PluginCtx) -> AppResult<()> {
        let snap = self.api.snapshot();
        info!(
            ticker = %ctx.debut().ticker(),
            candles = snap.candles,
            volume = snap.volume,
            filtered_ticks = snap.filtered_ticks,
            "Stats collection finished"
        );
        Ok(())
    }
}
