//! Plugin context: what a handler can reach while it runs.

use std::any::Any;
use std::sync::Arc;

use debut_core::traits::DebutCore;

use super::public::PublicApi;
use crate::registry::{Plugin, PluginRegistry};

/// Runtime context passed to every plugin handler.
///
/// Gives access to the other plugins of the same strategy and to the
/// strategy itself. The host engine gets the same view through
/// [`PluginDriver::context`](crate::driver::PluginDriver::context).
#[derive(Clone)]
pub struct PluginCtx {
    /// Registry of the owning driver.
    registry: Arc<PluginRegistry>,
    /// Strategy that owns the driver.
    debut: Arc<dyn DebutCore>,
}

impl PluginCtx {
    /// Creates a context over `registry` for the strategy `debut`.
    pub fn new(registry: Arc<PluginRegistry>, debut: Arc<dyn DebutCore>) -> Self {
        Self { registry, debut }
    }

    /// Finds a registered plugin by name.
    ///
    /// Returns `None` for unknown names so optional dependencies can
    /// degrade gracefully.
    pub fn find_plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.registry.get(name)
    }

    /// Finds the capability object of another plugin as `T`.
    pub fn find_api<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.registry.public_api().get::<T>(name)
    }

    /// All published capability objects.
    pub fn public_api(&self) -> PublicApi {
        self.registry.public_api()
    }

    /// The owning strategy.
    pub fn debut(&self) -> &Arc<dyn DebutCore> {
        &self.debut
    }
}

impl std::fmt::Debug for PluginCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCtx")
            .field("ticker", &self.debut.ticker())
            .field("plugins", &self.registry.names())
            .finish()
    }
}
