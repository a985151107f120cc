//! Aggregated statistics: named scalars computed once and read by the metrics.
//!
//! Lookups are total: a missing key or a NaN/infinite value reads as 0.0 through
//! [`AggregatedStats::safe_get`], so a broken upstream statistic can never fault a
//! metric or the composite score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{PlResolver, SampleSelector, TradeOrder};

/// Well-known statistic names.
pub mod keys {
    pub const NET_PROFIT: &str = "NetProfit";
    pub const GROSS_PROFIT: &str = "GrossProfit";
    pub const GROSS_LOSS: &str = "GrossLoss";
    pub const DRAWDOWN: &str = "Drawdown";
    pub const AVG_LOSS: &str = "AvgLoss";
    pub const NUMBER_OF_TRADES: &str = "NumberOfTrades";

    pub const PROFIT_FACTOR: &str = "ProfitFactor";
    pub const RETURN_DD_RATIO: &str = "ReturnDDRatio";
    pub const R_EXPECTANCY: &str = "RExpectancy";
    pub const SHARPE_RATIO: &str = "SharpeRatio";
    pub const STABILITY: &str = "Stability";
    pub const STAGNATION: &str = "Stagnation";

    /// Unix milliseconds of the longest stagnation window's start (0 if none).
    pub const STAGNATION_FROM: &str = "StagnationFrom";
    /// Unix milliseconds of the longest stagnation window's end (0 if none).
    pub const STAGNATION_TO: &str = "StagnationTo";
    pub const STAGNATION_PERIOD_PCT: &str = "StagnationPeriodPct";
}

/// Name → scalar map of previously computed statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedStats {
    values: BTreeMap<String, f64>,
}

impl AggregatedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value under `key`, or `None` when absent or not finite.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied().filter(|v| v.is_finite())
    }

    /// The value under `key`, with absent or non-finite values read as 0.0.
    pub fn safe_get(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(v) => v,
            None => {
                tracing::trace!(key, "statistic missing or non-finite, using 0.0");
                0.0
            }
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Aggregate the base trade statistics the ratio metrics depend on.
    ///
    /// Orders the resolver attributes nothing to (other direction) are not
    /// counted. `GrossLoss` and `Drawdown` are magnitudes (>= 0); `AvgLoss`
    /// keeps its sign (<= 0).
    pub fn from_orders(
        orders: &[TradeOrder],
        selector: &SampleSelector,
        resolver: &dyn PlResolver,
    ) -> Self {
        let mut net_profit = 0.0;
        let mut gross_profit = 0.0;
        let mut gross_loss = 0.0;
        let mut losers = 0usize;
        let mut trades = 0usize;

        let mut balance = 0.0_f64;
        let mut peak = 0.0_f64;
        let mut max_dd = 0.0_f64;

        for order in orders {
            if !selector.direction.admits(order.side) {
                continue;
            }
            let pl = resolver.pl_for(order, selector);
            trades += 1;
            net_profit += pl;
            if pl > 0.0 {
                gross_profit += pl;
            } else if pl < 0.0 {
                gross_loss += pl.abs();
                losers += 1;
            }

            balance += pl;
            if balance > peak {
                peak = balance;
            }
            max_dd = max_dd.max(peak - balance);
        }

        let avg_loss = if losers > 0 {
            -gross_loss / losers as f64
        } else {
            0.0
        };

        Self::new()
            .with(keys::NET_PROFIT, net_profit)
            .with(keys::GROSS_PROFIT, gross_profit)
            .with(keys::GROSS_LOSS, gross_loss)
            .with(keys::DRAWDOWN, max_dd)
            .with(keys::AVG_LOSS, avg_loss)
            .with(keys::NUMBER_OF_TRADES, trades as f64)
    }
}

impl FromIterator<(String, f64)> for AggregatedStats {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
