//! Hook invocations with their arguments.
//!
//! Each reduction category has its own call type, so the typed driver
//! entry points cannot be handed a hook of the wrong category. [`HookCall`]
//! covers every hook for hosts that pick the hook at runtime; converting it
//! into a category-specific call is where a mismatch is caught.

use debut_core::error::AppError;
use debut_core::types::{Candle, ExecutedOrder, OrderOptions};

use super::definitions::{HookCategory, PluginHook};

/// Synchronous hook calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncHook {
    /// `onInit()`
    OnInit,
}

impl SyncHook {
    /// The hook being called.
    pub fn hook(&self) -> PluginHook {
        match self {
            Self::OnInit => PluginHook::OnInit,
        }
    }
}

/// Awaited hook calls whose results are ignored.
#[derive(Debug, Clone, Copy)]
pub enum AsyncHook<'a> {
    /// `onStart()`
    OnStart,
    /// `onDispose()`
    OnDispose,
    /// `onOpen(order)`
    OnOpen(&'a ExecutedOrder),
    /// `onClose(order, closing)`
    OnClose(&'a ExecutedOrder, &'a ExecutedOrder),
    /// `onCandle(candle)`
    OnCandle(&'a Candle),
    /// `onAfterCandle(candle)`
    OnAfterCandle(&'a Candle),
}

impl AsyncHook<'_> {
    /// The hook being called.
    pub fn hook(&self) -> PluginHook {
        match self {
            Self::OnStart => PluginHook::OnStart,
            Self::OnDispose => PluginHook::OnDispose,
            Self::OnOpen(_) => PluginHook::OnOpen,
            Self::OnClose(..) => PluginHook::OnClose,
            Self::OnCandle(_) => PluginHook::OnCandle,
            Self::OnAfterCandle(_) => PluginHook::OnAfterCandle,
        }
    }
}

/// Awaited hook calls where any plugin may veto.
#[derive(Debug, Clone, Copy)]
pub enum SkipHook<'a> {
    /// `onBeforeOpen(order)`
    OnBeforeOpen(&'a OrderOptions),
    /// `onBeforeClose(order, closing)`
    OnBeforeClose(&'a OrderOptions, &'a ExecutedOrder),
    /// `onTick(tick)`
    OnTick(&'a Candle),
}

impl SkipHook<'_> {
    /// The hook being called.
    pub fn hook(&self) -> PluginHook {
        match self {
            Self::OnBeforeOpen(_) => PluginHook::OnBeforeOpen,
            Self::OnBeforeClose(..) => PluginHook::OnBeforeClose,
            Self::OnTick(_) => PluginHook::OnTick,
        }
    }
}

/// Any hook call, category decided at runtime.
#[derive(Debug, Clone, Copy)]
pub enum HookCall<'a> {
    /// `onInit()`
    OnInit,
    /// `onStart()`
    OnStart,
    /// `onDispose()`
    OnDispose,
    /// `onBeforeOpen(order)`
    OnBeforeOpen(&'a OrderOptions),
    /// `onOpen(order)`
    OnOpen(&'a ExecutedOrder),
    /// `onBeforeClose(order, closing)`
    OnBeforeClose(&'a OrderOptions, &'a ExecutedOrder),
    /// `onClose(order, closing)`
    OnClose(&'a ExecutedOrder, &'a ExecutedOrder),
    /// `onTick(tick)`
    OnTick(&'a Candle),
    /// `onCandle(candle)`
    OnCandle(&'a Candle),
    /// `onAfterCandle(candle)`
    OnAfterCandle(&'a Candle),
}

impl HookCall<'_> {
    /// The hook being called.
    pub fn hook(&self) -> PluginHook {
        match self {
            Self::OnInit => PluginHook::OnInit,
            Self::OnStart => PluginHook::OnStart,
            Self::OnDispose => PluginHook::OnDispose,
            Self::OnBeforeOpen(_) => PluginHook::OnBeforeOpen,
            Self::OnOpen(_) => PluginHook::OnOpen,
            Self::OnBeforeClose(..) => PluginHook::OnBeforeClose,
            Self::OnClose(..) => PluginHook::OnClose,
            Self::OnTick(_) => PluginHook::OnTick,
            Self::OnCandle(_) => PluginHook::OnCandle,
            Self::OnAfterCandle(_) => PluginHook::OnAfterCandle,
        }
    }

    /// The reduction category of the hook being called.
    pub fn category(&self) -> HookCategory {
        self.hook().category()
    }
}

fn mismatch(hook: PluginHook, wanted: HookCategory) -> AppError {
    AppError::contract(format!(
        "{hook} is declared {} and cannot be reduced as {wanted}",
        hook.category()
    ))
}

impl From<SyncHook> for HookCall<'_> {
    fn from(call: SyncHook) -> Self {
        match call {
            SyncHook::OnInit => Self::OnInit,
        }
    }
}

impl<'a> From<AsyncHook<'a>> for HookCall<'a> {
    fn from(call: AsyncHook<'a>) -> Self {
        match call {
            AsyncHook::OnStart => Self::OnStart,
            AsyncHook::OnDispose => Self::OnDispose,
            AsyncHook::OnOpen(order) => Self::OnOpen(order),
            AsyncHook::OnClose(order, closing) => Self::OnClose(order, closing),
            AsyncHook::OnCandle(candle) => Self::OnCandle(candle),
            AsyncHook::OnAfterCandle(candle) => Self::OnAfterCandle(candle),
        }
    }
}

impl<'a> From<SkipHook<'a>> for HookCall<'a> {
    fn from(call: SkipHook<'a>) -> Self {
        match call {
            SkipHook::OnBeforeOpen(order) => Self::OnBeforeOpen(order),
            SkipHook::OnBeforeClose(order, closing) => Self::OnBeforeClose(order, closing),
            SkipHook::OnTick(tick) => Self::OnTick(tick),
        }
    }
}

impl TryFrom<HookCall<'_>> for SyncHook {
    type Error = AppError;

    fn try_from(call: HookCall<'_>) -> Result<Self, Self::Error> {
        match call {
            HookCall::OnInit => Ok(Self::OnInit),
            other => Err(mismatch(other.hook(), HookCategory::Sync)),
        }
    }
}

impl<'a> TryFrom<HookCall<'a>> for AsyncHook<'a> {
    type Error = AppError;

    fn try_from(call: HookCall<'a>) -> Result<Self, Self::Error> {
        match call {
            HookCall::OnStart => Ok(Self::OnStart),
            HookCall::OnDispose => Ok(Self::OnDispose),
            HookCall::OnOpen(order) => Ok(Self::OnOpen(order)),
            HookCall::OnClose(order, closing) => Ok(Self::OnClose(order, closing)),
            HookCall::OnCandle(candle) => Ok(Self::OnCandle(candle)),
            HookCall::OnAfterCandle(candle) => Ok(Self::OnAfterCandle(candle)),
            other => Err(mismatch(other.hook(), HookCategory::Async)),
        }
    }
}

impl<'a> TryFrom<HookCall<'a>> for SkipHook<'a> {
    type Error = AppError;

    fn try_from(call: HookCall<'a>) -> Result<Self, Self::Error> {
        match call {
            HookCall::OnBeforeOpen(order) => Ok(Self::OnBeforeOpen(order)),
            HookCall::OnBeforeClose(order, closing) => Ok(Self::OnBeforeClose(order, closing)),
            HookCall::OnTick(tick) => Ok(Self::OnTick(tick)),
            other => Err(mismatch(other.hook(), HookCategory::AsyncSkip)),
        }
    }
}
