//! Plugin driver configuration.

use serde::{Deserialize, Serialize};

/// What `register` does when a plugin name is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the whole batch with a `Conflict` error.
    #[default]
    Reject,
    /// Swap the new plugin into the slot of the existing one.
    Replace,
}

/// Plugin driver configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Duplicate plugin name handling.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Emit a warning when a single handler runs longer than this.
    #[serde(default)]
    pub slow_handler_warn_ms: Option<u64>,
    /// Plugin names skipped at registration.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl PluginConfig {
    /// Returns whether the named plugin is disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|n| n == name)
    }
}
