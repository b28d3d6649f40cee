//! Plugin driver, one per strategy instance.
//!
//! The host engine registers plugins once during setup and then calls the
//! reduce methods at each lifecycle point:
//!
//! - [`sync_reduce`](PluginDriver::sync_reduce) for `onInit`
//! - [`async_reduce`](PluginDriver::async_reduce) for hooks whose results
//!   are ignored
//! - [`async_skip_reduce`](PluginDriver::async_skip_reduce) for hooks where
//!   any plugin can veto
//!
//! The typed call enums make a category mismatch a compile error. Hosts
//! that choose the hook at runtime go through [`HookCall`] and the `try_*`
//! methods, which reject a mismatch before any handler runs.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, info};

use debut_core::config::PluginConfig;
use debut_core::error::AppError;
use debut_core::result::AppResult;
use debut_core::traits::DebutCore;

use crate::api::context::PluginCtx;
use crate::api::public::PublicApi;
use crate::hooks::calls::{AsyncHook, HookCall, SkipHook, SyncHook};
use crate::hooks::definitions::{HookAction, HookCategory, PluginHook};
use crate::hooks::reduce::{ReduceOutcome, ReducePolicy, reduce};
use crate::registry::{DriverPhase, Plugin, PluginRegistry};

/// Registers plugins and reduces hook calls across them.
#[derive(Debug)]
pub struct PluginDriver {
    /// Plugin registry, shared with the runtime context.
    registry: Arc<PluginRegistry>,
    /// Context handed to every handler.
    ctx: PluginCtx,
    /// Driver settings.
    config: PluginConfig,
}

impl PluginDriver {
    /// Creates a driver for the strategy `debut` with default settings.
    pub fn new(debut: Arc<dyn DebutCore>) -> Self {
        Self::with_config(debut, PluginConfig::default())
    }

    /// Creates a driver for the strategy `debut`.
    pub fn with_config(debut: Arc<dyn DebutCore>, config: PluginConfig) -> Self {
        let registry = Arc::new(PluginRegistry::new());
        let ctx = PluginCtx::new(Arc::clone(&registry), debut);

        Self {
            registry,
            ctx,
            config,
        }
    }

    /// Registers plugins in the given order.
    ///
    /// Plugins named in `disabled` are dropped. Duplicate names follow the
    /// configured [`DuplicatePolicy`](debut_core::config::DuplicatePolicy).
    pub fn register(&self, plugins: Vec<Arc<dyn Plugin>>) -> AppResult<()> {
        let (enabled, disabled): (Vec<_>, Vec<_>) = plugins
            .into_iter()
            .partition(|plugin| !self.config.is_disabled(plugin.name()));

        for plugin in &disabled {
            info!(plugin = %plugin.name(), "Plugin disabled by configuration");
        }

        let count = enabled.len();
        self.registry
            .register(enabled, self.config.duplicate_policy)?;

        info!(
            registered = count,
            total = self.registry.count(),
            "Plugins registered"
        );

        Ok(())
    }

    /// Runs a synchronous hook.
    pub fn sync_reduce(&self, call: SyncHook) -> AppResult<()> {
        self.run_sync(call).map(|_| ())
    }

    /// Runs an asynchronous hook, awaiting each handler in order.
    ///
    /// The first failing handler aborts the call. A successful `onDispose`
    /// tears the driver down.
    pub async fn async_reduce(&self, call: AsyncHook<'_>) -> AppResult<()> {
        self.run_async(call).await.map(|_| ())
    }

    /// Runs a skippable hook, stopping at the first plugin that skips.
    pub async fn async_skip_reduce(&self, call: SkipHook<'_>) -> AppResult<ReduceOutcome> {
        self.run_skip(call).await
    }

    /// [`sync_reduce`](Self::sync_reduce) for a hook chosen at runtime.
    pub fn try_sync_reduce(&self, call: HookCall<'_>) -> AppResult<()> {
        self.sync_reduce(SyncHook::try_from(call)?)
    }

    /// [`async_reduce`](Self::async_reduce) for a hook chosen at runtime.
    pub async fn try_async_reduce(&self, call: HookCall<'_>) -> AppResult<()> {
        self.async_reduce(AsyncHook::try_from(call)?).await
    }

    /// [`async_skip_reduce`](Self::async_skip_reduce) for a hook chosen at
    /// runtime.
    pub async fn try_async_skip_reduce(&self, call: HookCall<'_>) -> AppResult<ReduceOutcome> {
        self.async_skip_reduce(SkipHook::try_from(call)?).await
    }

    /// Runs any hook with the semantics of its own category.
    pub async fn dispatch(&self, call: HookCall<'_>) -> AppResult<ReduceOutcome> {
        match call.category() {
            HookCategory::Sync => self.run_sync(SyncHook::try_from(call)?),
            HookCategory::Async => self.run_async(AsyncHook::try_from(call)?).await,
            HookCategory::AsyncSkip => self.run_skip(SkipHook::try_from(call)?).await,
        }
    }

    /// Returns the aggregated capability objects of all plugins.
    pub fn get_public_api(&self) -> PublicApi {
        self.registry.public_api()
    }

    /// Finds a registered plugin by name.
    pub fn find_plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.ctx.find_plugin(name)
    }

    /// Returns the runtime context handed to plugins.
    pub fn context(&self) -> &PluginCtx {
        &self.ctx
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> DriverPhase {
        self.registry.phase()
    }

    /// Plugin names in registration order.
    pub fn plugin_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.registry.count()
    }

    /// Returns whether no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of plugins handling `hook`.
    pub fn handler_count(&self, hook: PluginHook) -> usize {
        self.registry.handler_count(hook)
    }

    /// Returns whether any plugin handles `hook`.
    pub fn has_handlers(&self, hook: PluginHook) -> bool {
        self.handler_count(hook) > 0
    }

    fn policy(&self, stop_on_skip: bool) -> ReducePolicy {
        ReducePolicy {
            stop_on_skip,
            slow_handler_warn: self.config.slow_handler_warn_ms.map(Duration::from_millis),
        }
    }

    fn run_sync(&self, call: SyncHook) -> AppResult<ReduceOutcome> {
        let hook = call.hook();
        let plugins = self.registry.begin_dispatch(hook)?;
        let ctx = &self.ctx;

        reduce(hook, &plugins, self.policy(false), |plugin| {
            let result = match call {
                SyncHook::OnInit => plugin.on_init(ctx),
            };
            Box::pin(futures::future::ready(
                result.map(|()| HookAction::Continue),
            ))
        })
        .now_or_never()
        .ok_or_else(|| AppError::internal(format!("{hook} reduction suspended")))?
    }

    async fn run_async(&self, call: AsyncHook<'_>) -> AppResult<ReduceOutcome> {
        let hook = call.hook();
        let plugins = self.registry.begin_dispatch(hook)?;
        let ctx = &self.ctx;

        let outcome = reduce(hook, &plugins, self.policy(false), |plugin| {
            Box::pin(async move {
                let result = match call {
                    AsyncHook::OnStart => plugin.on_start(ctx).await,
                    AsyncHook::OnDispose => plugin.on_dispose(ctx).await,
                    AsyncHook::OnOpen(order) => plugin.on_open(ctx, order).await,
                    AsyncHook::OnClose(order, closing) => {
                        plugin.on_close(ctx, order, closing).await
                    }
                    AsyncHook::OnCandle(candle) => plugin.on_candle(ctx, candle).await,
                    AsyncHook::OnAfterCandle(candle) => {
                        plugin.on_after_candle(ctx, candle).await
                    }
                };
                result.map(|()| HookAction::Continue)
            })
        })
        .await?;

        if hook == PluginHook::OnDispose {
            self.registry.dispose();
        }

        Ok(outcome)
    }

    async fn run_skip(&self, call: SkipHook<'_>) -> AppResult<ReduceOutcome> {
        let hook = call.hook();
        let plugins = self.registry.begin_dispatch(hook)?;
        let ctx = &self.ctx;

        let outcome = reduce(hook, &plugins, self.policy(true), |plugin| {
            Box::pin(async move {
                match call {
                    SkipHook::OnBeforeOpen(order) => plugin.on_before_open(ctx, order).await,
                    SkipHook::OnBeforeClose(order, closing) => {
                        plugin.on_before_close(ctx, order, closing).await
                    }
                    SkipHook::OnTick(tick) => plugin.on_tick(ctx, tick).await,
                }
            })
        })
        .await?;

        debug!(hook = %hook, skipped = outcome.is_skip(), "Skip reduction finished");

        Ok(outcome)
    }
}
