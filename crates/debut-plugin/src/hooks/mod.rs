//! Hook system: hook names, typed call payloads and the ordered reduction.

pub mod calls;
pub mod definitions;
pub mod reduce;

pub use calls::{AsyncHook, HookCall, SkipHook, SyncHook};
pub use definitions::{HookAction, HookCategory, PluginHook};
pub use reduce::ReduceOutcome;
