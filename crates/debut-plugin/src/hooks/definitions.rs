//! Hook names, their reduction categories, and the action skip hooks return.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use debut_core::error::AppError;

/// Every lifecycle point a plugin can hook into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PluginHook {
    // ── Setup / teardown ──
    /// Synchronous setup, before any market data.
    OnInit,
    /// Strategy is starting.
    OnStart,
    /// Strategy is being disposed. The driver is torn down once every
    /// handler resolved.
    OnDispose,

    // ── Orders ──
    /// Before an order is sent. Can veto.
    OnBeforeOpen,
    /// After an order was executed.
    OnOpen,
    /// Before a closing order is sent. Can veto.
    OnBeforeClose,
    /// After a closing order was executed.
    OnClose,

    // ── Market data ──
    /// Every price update. Can suppress default tick handling.
    OnTick,
    /// A candle closed.
    OnCandle,
    /// A candle closed and the strategy finished processing it.
    OnAfterCandle,
}

impl PluginHook {
    /// All hooks, in lifecycle order.
    pub const ALL: [PluginHook; 10] = [
        Self::OnInit,
        Self::OnStart,
        Self::OnDispose,
        Self::OnBeforeOpen,
        Self::OnOpen,
        Self::OnBeforeClose,
        Self::OnClose,
        Self::OnTick,
        Self::OnCandle,
        Self::OnAfterCandle,
    ];

    /// Returns the hook name as plugins know it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnInit => "onInit",
            Self::OnStart => "onStart",
            Self::OnDispose => "onDispose",
            Self::OnBeforeOpen => "onBeforeOpen",
            Self::OnOpen => "onOpen",
            Self::OnBeforeClose => "onBeforeClose",
            Self::OnClose => "onClose",
            Self::OnTick => "onTick",
            Self::OnCandle => "onCandle",
            Self::OnAfterCandle => "onAfterCandle",
        }
    }

    /// Returns how the driver reduces this hook across plugins.
    pub fn category(&self) -> HookCategory {
        match self {
            Self::OnInit => HookCategory::Sync,
            Self::OnBeforeOpen | Self::OnBeforeClose | Self::OnTick => HookCategory::AsyncSkip,
            Self::OnStart
            | Self::OnDispose
            | Self::OnOpen
            | Self::OnClose
            | Self::OnCandle
            | Self::OnAfterCandle => HookCategory::Async,
        }
    }

    /// Returns whether a plugin can veto the pending action.
    pub fn can_skip(&self) -> bool {
        self.category() == HookCategory::AsyncSkip
    }
}

impl fmt::Display for PluginHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginHook {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown plugin hook '{s}'")))
    }
}

/// Reduction semantics, fixed per hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookCategory {
    /// Plain calls, no suspension.
    Sync,
    /// Each handler awaited in order; results ignored.
    Async,
    /// Each handler awaited in order; the first skip wins.
    AsyncSkip,
}

impl fmt::Display for HookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => f.write_str("sync"),
            Self::Async => f.write_str("async"),
            Self::AsyncSkip => f.write_str("async-skip"),
        }
    }
}

/// Returned by skip-capable handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookAction {
    /// Let the next plugin (and then the engine) proceed.
    #[default]
    Continue,
    /// Stop consulting plugins and tell the engine to skip the action.
    Skip {
        /// Optional explanation, logged by the driver.
        reason: Option<String>,
    },
}

impl HookAction {
    /// Creates a skip with a reason.
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip {
            reason: Some(reason.into()),
        }
    }

    /// Returns whether this action vetoes.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip { .. })
    }
}

impl From<bool> for HookAction {
    fn from(skip: bool) -> Self {
        if skip {
            Self::Skip { reason: None }
        } else {
            Self::Continue
        }
    }
}
