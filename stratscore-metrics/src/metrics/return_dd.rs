//! Return / drawdown ratio: net profit per unit of maximum drawdown.

use stratscore_core::numeric::{round2, safe_divide};
use stratscore_core::stats::keys;

use crate::metric::{Goal, Metric, MetricInfo, MetricInput, MetricOutput, Precision};

/// Returned when there is profit but no drawdown: half of the usual maximum.
pub const NO_DRAWDOWN_RATIO: f64 = 10.0;

pub fn info() -> MetricInfo {
    MetricInfo {
        tooltip: Some("Return / Drawdown Ratio"),
        precision: Precision::Decimal2,
        goal: Goal::Maximize,
        range: (-20.0, 20.0),
        dependencies: &[keys::NET_PROFIT, keys::DRAWDOWN, keys::NUMBER_OF_TRADES],
        ..MetricInfo::new(keys::RETURN_DD_RATIO, "Ret/DD Ratio")
    }
}

/// Drawdown may be given signed or as a magnitude; only `|drawdown|` is used.
pub fn return_dd_ratio(net_profit: f64, drawdown: f64, trades: i64) -> f64 {
    if trades == 0 {
        return 0.0;
    }
    let dd = drawdown.abs();
    if dd == 0.0 {
        if net_profit == 0.0 {
            return 0.0;
        }
        tracing::debug!(net_profit, "no drawdown, return/drawdown uses sentinel");
        return NO_DRAWDOWN_RATIO;
    }
    round2(safe_divide(net_profit, dd))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnDdRatio;

impl Metric for ReturnDdRatio {
    fn compute(&self, input: &MetricInput<'_>) -> MetricOutput {
        let stats = input.stats;
        MetricOutput::value(return_dd_ratio(
            stats.safe_get(keys::NET_PROFIT),
            stats.safe_get(keys::DRAWDOWN),
            stats.safe_get(keys::NUMBER_OF_TRADES) as i64,
        ))
    }
}
