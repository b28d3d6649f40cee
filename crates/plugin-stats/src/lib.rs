//! Statistics plugin for Debut strategies.
//!
//! Counts closed candles, traded volume and executed orders, and publishes
//! the running totals through its public API under the name `stats`.

pub mod api;
pub mod plugin;

pub use api::{StatsApi, StatsSnapshot};
pub use plugin::StatsPlugin;
