//! Plugin API: runtime context and the public capability surface.

pub mod context;
pub mod public;

pub use context::PluginCtx;
pub use public::{PluginApi, PublicApi};
