//! Plugin registry: ordered plugin list, name index and driver lifecycle.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use debut_core::config::DuplicatePolicy;
use debut_core::error::AppError;
use debut_core::result::AppResult;
use debut_core::types::{Candle, ExecutedOrder, OrderOptions};

use crate::api::context::PluginCtx;
use crate::api::public::{PluginApi, PublicApi};
use crate::hooks::definitions::{HookAction, PluginHook};

/// Trait that all plugins implement.
///
/// One method per hook, each with the hook's fixed signature. The driver
/// calls every plugin for every hook in registration order; the default
/// method bodies are no-ops that return [`HookAction::Continue`] where a
/// result is expected, so overriding a method is what handles a hook.
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Unique plugin name.
    fn name(&self) -> &str;

    /// Hooks this plugin handles, as reported by
    /// [`PluginRegistry::handler_count`]. Dispatch does not consult it.
    fn registered_hooks(&self) -> Vec<PluginHook>;

    /// Capability object published under the plugin name.
    fn api(&self) -> Option<PluginApi> {
        None
    }

    /// `onInit`: synchronous setup.
    fn on_init(&self, _ctx: &PluginCtx) -> AppResult<()> {
        Ok(())
    }

    /// `onStart`
    async fn on_start(&self, _ctx: &PluginCtx) -> AppResult<()> {
        Ok(())
    }

    /// `onDispose`
    async fn on_dispose(&self, _ctx: &PluginCtx) -> AppResult<()> {
        Ok(())
    }

    /// `onBeforeOpen`: return [`HookAction::Skip`] to veto the order.
    async fn on_before_open(&self, _ctx: &PluginCtx, _order: &OrderOptions) -> AppResult<HookAction> {
        Ok(HookAction::Continue)
    }

    /// `onOpen`
    async fn on_open(&self, _ctx: &PluginCtx, _order: &ExecutedOrder) -> AppResult<()> {
        Ok(())
    }

    /// `onBeforeClose`: return [`HookAction::Skip`] to veto closing `closing`.
    async fn on_before_close(
        &self,
        _ctx: &PluginCtx,
        _order: &OrderOptions,
        _closing: &ExecutedOrder,
    ) -> AppResult<HookAction> {
        Ok(HookAction::Continue)
    }

    /// `onClose`
    async fn on_close(
        &self,
        _ctx: &PluginCtx,
        _order: &ExecutedOrder,
        _closing: &ExecutedOrder,
    ) -> AppResult<()> {
        Ok(())
    }

    /// `onTick`: return [`HookAction::Skip`] to suppress default tick handling.
    async fn on_tick(&self, _ctx: &PluginCtx, _tick: &Candle) -> AppResult<HookAction> {
        Ok(HookAction::Continue)
    }

    /// `onCandle`
    async fn on_candle(&self, _ctx: &PluginCtx, _candle: &Candle) -> AppResult<()> {
        Ok(())
    }

    /// `onAfterCandle`
    async fn on_after_candle(&self, _ctx: &PluginCtx, _candle: &Candle) -> AppResult<()> {
        Ok(())
    }
}

/// Where the driver is in the strategy lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverPhase {
    /// `register` was never called.
    Pending,
    /// Plugins registered, no hook dispatched yet.
    Registered,
    /// Hooks are being dispatched; the registry is frozen.
    Dispatching,
    /// `onDispose` resolved; the registry was torn down.
    Disposed,
}

#[derive(Debug)]
struct PluginEntry {
    name: String,
    plugin: Arc<dyn Plugin>,
    hooks: HashSet<PluginHook>,
    api: Option<PluginApi>,
}

impl PluginEntry {
    fn new(plugin: Arc<dyn Plugin>) -> Self {
        Self {
            name: plugin.name().to_string(),
            hooks: plugin.registered_hooks().into_iter().collect(),
            api: plugin.api(),
            plugin,
        }
    }
}

#[derive(Debug)]
struct RegistryState {
    /// Registration order.
    entries: Vec<PluginEntry>,
    /// Plugin name → position in `entries`.
    index: HashMap<String, usize>,
    public_api: PublicApi,
    phase: DriverPhase,
}

/// Registry of all plugins of one strategy instance.
#[derive(Debug)]
pub struct PluginRegistry {
    state: RwLock<RegistryState>,
}

impl PluginRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                entries: Vec::new(),
                index: HashMap::new(),
                public_api: PublicApi::default(),
                phase: DriverPhase::Pending,
            }),
        }
    }

    /// Appends plugins in the given order.
    ///
    /// With [`DuplicatePolicy::Reject`] a name collision (with an already
    /// registered plugin or inside the batch) fails the whole batch and
    /// leaves the registry untouched. With [`DuplicatePolicy::Replace`] the
    /// new plugin takes over the slot of the old one.
    pub fn register(
        &self,
        plugins: Vec<Arc<dyn Plugin>>,
        policy: DuplicatePolicy,
    ) -> AppResult<()> {
        // Plugin code runs before the lock is taken.
        let incoming: Vec<PluginEntry> = plugins.into_iter().map(PluginEntry::new).collect();

        let mut state = self.state.write();

        match state.phase {
            DriverPhase::Pending | DriverPhase::Registered => {}
            DriverPhase::Dispatching => {
                return Err(AppError::contract(
                    "Plugins cannot be registered after hook dispatch started",
                ));
            }
            DriverPhase::Disposed => {
                return Err(AppError::contract(
                    "Plugins cannot be registered on a disposed driver",
                ));
            }
        }

        let mut seen = HashSet::new();
        for entry in &incoming {
            let name = entry.name.as_str();
            if name.trim().is_empty() {
                return Err(AppError::validation("Plugin name must not be empty"));
            }
            if policy == DuplicatePolicy::Reject
                && (state.index.contains_key(name) || !seen.insert(name))
            {
                return Err(AppError::conflict(format!(
                    "Plugin '{name}' is already registered"
                )));
            }
        }

        for entry in incoming {
            info!(
                plugin = %entry.name,
                hooks = entry.hooks.len(),
                has_api = entry.api.is_some(),
                "Registering plugin"
            );

            match state.index.get(&entry.name).copied() {
                Some(slot) => {
                    info!(plugin = %entry.name, slot, "Replacing plugin with the same name");
                    state.entries[slot] = entry;
                }
                None => {
                    let slot = state.entries.len();
                    state.index.insert(entry.name.clone(), slot);
                    state.entries.push(entry);
                }
            }
        }

        let public_api = PublicApi::from_entries(
            state
                .entries
                .iter()
                .filter_map(|e| e.api.clone().map(|api| (e.name.clone(), api)))
                .collect(),
        );
        state.public_api = public_api;
        state.phase = DriverPhase::Registered;

        Ok(())
    }

    /// Gets a plugin by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        let state = self.state.read();
        state
            .index
            .get(name)
            .map(|&slot| Arc::clone(&state.entries[slot].plugin))
    }

    /// Checks whether a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.state.read().index.contains_key(name)
    }

    /// Plugin names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.state
            .read()
            .entries
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    /// Returns plugin count.
    pub fn count(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Plugins declaring `hook`, in registration order.
    pub fn handlers(&self, hook: PluginHook) -> Vec<Arc<dyn Plugin>> {
        self.state
            .read()
            .entries
            .iter()
            .filter(|e| e.hooks.contains(&hook))
            .map(|e| Arc::clone(&e.plugin))
            .collect()
    }

    /// Returns the number of plugins declaring `hook`.
    pub fn handler_count(&self, hook: PluginHook) -> usize {
        self.state
            .read()
            .entries
            .iter()
            .filter(|e| e.hooks.contains(&hook))
            .count()
    }

    /// Returns the aggregated capability objects.
    pub fn public_api(&self) -> PublicApi {
        self.state.read().public_api.clone()
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> DriverPhase {
        self.state.read().phase
    }

    /// Freezes the registry for dispatch and snapshots every plugin in
    /// registration order.
    pub(crate) fn begin_dispatch(&self, hook: PluginHook) -> AppResult<Vec<Arc<dyn Plugin>>> {
        let mut state = self.state.write();

        match state.phase {
            DriverPhase::Pending => Err(AppError::contract(format!(
                "{hook} dispatched before any plugins were registered"
            ))),
            DriverPhase::Disposed => Err(AppError::contract(format!(
                "{hook} dispatched on a disposed driver"
            ))),
            DriverPhase::Registered | DriverPhase::Dispatching => {
                state.phase = DriverPhase::Dispatching;
                Ok(state.entries.iter().map(|e| Arc::clone(&e.plugin)).collect())
            }
        }
    }

    /// Tears the registry down after `onDispose`.
    pub(crate) fn dispose(&self) {
        let mut state = self.state.write();
        let count = state.entries.len();

        state.entries.clear();
        state.index.clear();
        state.public_api = PublicApi::default();
        state.phase = DriverPhase::Disposed;

        info!(plugins = count, "Plugin registry disposed");
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
