//! # debut-plugin
//!
//! Plugin driver for Debut strategies. Provides:
//!
//! - Plugin registration with a name index and duplicate policy
//! - Ordered hook reduction in three flavours: sync, async, async-skip
//! - Cross-plugin lookup through [`PluginCtx::find_plugin`]
//! - Aggregated public capability objects ([`PublicApi`])

pub mod api;
pub mod driver;
pub mod hooks;
pub mod prelude;
pub mod registry;

pub use api::context::PluginCtx;
pub use api::public::{PluginApi, PublicApi};
pub use driver::PluginDriver;
pub use hooks::calls::{AsyncHook, HookCall, SkipHook, SyncHook};
pub use hooks::definitions::{HookAction, HookCategory, PluginHook};
pub use hooks::reduce::ReduceOutcome;
pub use registry::{DriverPhase, Plugin, PluginRegistry};
