//! Prelude for plugin authors.

pub use async_trait::async_trait;

pub use debut_core::traits::DebutCore;
pub use debut_core::types::{Candle, ExecutedOrder, OrderOptions, OrderType};
pub use debut_core::{AppError, AppResult, ErrorKind};

pub use crate::api::context::PluginCtx;
pub use crate::api::public::{PluginApi, PublicApi};
pub use crate::driver::PluginDriver;
pub use crate::hooks::calls::{AsyncHook, HookCall, SkipHook, SyncHook};
pub use crate::hooks::definitions::{HookAction, PluginHook};
pub use crate::hooks::reduce::ReduceOutcome;
pub use crate::registry::Plugin;
