//! Tick filter plugin for Debut strategies.
//!
//! Skips `onTick` for ticks whose volume does not exceed a threshold so the
//! strategy never sees them. When a `stats` plugin is registered, every
//! suppressed tick is counted there as well.

pub mod plugin;

pub use plugin::TickFilterPlugin;
