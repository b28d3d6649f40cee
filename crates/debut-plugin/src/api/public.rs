//! Public API surface: every plugin's capability object keyed by name.

use std::any::Any;
use std::sync::Arc;

/// A plugin's capability object.
///
/// Consumers downcast it to the concrete type the plugin documents.
pub type PluginApi = Arc<dyn Any + Send + Sync>;

/// Aggregated capability objects, in registration order.
///
/// Cheap to clone; the host hands it to script consumers and plugins read
/// it through their context.
#[derive(Clone, Default)]
pub struct PublicApi {
    entries: Arc<Vec<(String, PluginApi)>>,
}

impl PublicApi {
    /// Wraps `(name, api)` pairs collected at registration.
    pub(crate) fn from_entries(entries: Vec<(String, PluginApi)>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Returns the raw capability object of a plugin.
    pub fn get_raw(&self, name: &str) -> Option<PluginApi> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, api)| Arc::clone(api))
    }

    /// Returns the capability object of a plugin as `T`.
    ///
    /// `None` when the plugin exposes nothing or exposes another type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get_raw(name).and_then(|api| api.downcast::<T>().ok())
    }

    /// Returns whether a plugin published a capability object.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Names of plugins with a capability object, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of published capability objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing was published.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PublicApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicApi")
            .field("plugins", &self.names())
            .finish()
    }
}
