//! Order models passed to order lifecycle hooks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Long.
    Buy,
    /// Short.
    Sell,
}

impl OrderType {
    /// Returns the opposite direction, used when closing.
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Proposed order, seen by `onBeforeOpen` / `onBeforeClose` before the
/// engine sends it to the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOptions {
    /// Client order id.
    pub cid: u64,
    /// Direction.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Instrument ticker.
    pub ticker: String,
    /// Expected fill price.
    pub price: f64,
    /// Order size in lots.
    pub lots: f64,
    /// Whether the order is simulated.
    #[serde(default)]
    pub sandbox: bool,
    /// Whether this order closes a position.
    #[serde(default)]
    pub close: bool,
    /// Client id of the order being closed, for closing orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id: Option<u64>,
    /// Candle time the order was created on.
    pub time: i64,
}

/// Order confirmed by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedOrder {
    /// Options the order was placed with.
    #[serde(flatten)]
    pub options: OrderOptions,
    /// Exchange order id.
    pub order_id: String,
    /// Actual fill price.
    pub executed_price: f64,
    /// Actual filled lots.
    pub executed_lots: f64,
    /// Commission charged.
    #[serde(default)]
    pub commission: f64,
}

impl ExecutedOrder {
    /// Client order id.
    pub fn cid(&self) -> u64 {
        self.options.cid
    }

    /// Direction.
    pub fn order_type(&self) -> OrderType {
        self.options.order_type
    }
}
