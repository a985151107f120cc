//! TradeOrder: a closed trade as seen by the metric engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of the position a trade held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Long,
    Short,
}

/// A closed trade: open/close instants plus realized P/L.
///
/// Orders are consumed in the order they are supplied. Callers must hand them
/// over sorted by non-decreasing `close_time`; nothing in the engine re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub side: OrderSide,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    /// Signed money P/L.
    pub profit_loss: f64,
    /// Signed percentage return attributable to this trade.
    pub percent_profit_loss: f64,
}

impl TradeOrder {
    pub fn new(
        side: OrderSide,
        open_time: DateTime<Utc>,
        close_time: DateTime<Utc>,
        profit_loss: f64,
        percent_profit_loss: f64,
    ) -> Self {
        Self {
            symbol: None,
            side,
            open_time,
            close_time,
            profit_loss,
            percent_profit_loss,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn is_winner(&self) -> bool {
        self.profit_loss > 0.0
    }

    /// Holding time from open to close.
    pub fn duration(&self) -> chrono::Duration {
        self.close_time - self.open_time
    }
}
