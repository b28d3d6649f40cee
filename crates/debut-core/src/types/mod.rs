//! Market data and order models shared by the engine and plugins.

pub mod candle;
pub mod order;

pub use candle::Candle;
pub use order::{ExecutedOrder, OrderOptions, OrderType};
