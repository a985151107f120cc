//! R-expectancy (Van Tharp): average profit per trade in units of average loss.

use stratscore_core::numeric::round4;
use stratscore_core::stats::keys;

use crate::metric::{Goal, Metric, MetricInfo, MetricInput, MetricOutput, Precision};

/// Returned when trades exist but none lost: undefined, but favorable.
pub const NO_LOSS_EXPECTANCY: f64 = 99_999.0;

pub fn info() -> MetricInfo {
    MetricInfo {
        precision: Precision::Decimal4,
        goal: Goal::Maximize,
        range: (-5.0, 5.0),
        dependencies: &[keys::NET_PROFIT, keys::NUMBER_OF_TRADES, keys::AVG_LOSS],
        ..MetricInfo::new(keys::R_EXPECTANCY, "R Expectancy")
    }
}

pub fn r_expectancy(net_profit: f64, trades: f64, avg_loss: f64) -> f64 {
    if trades == 0.0 {
        return 0.0;
    }
    let avg_loss = avg_loss.abs();
    if avg_loss == 0.0 {
        tracing::debug!(trades, "no average loss, r expectancy uses sentinel");
        return NO_LOSS_EXPECTANCY;
    }
    round4(net_profit / (trades * avg_loss))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RExpectancy;

impl Metric for RExpectancy {
    fn compute(&self, input: &MetricInput<'_>) -> MetricOutput {
        let stats = input.stats;
        MetricOutput::value(r_expectancy(
            stats.safe_get(keys::NET_PROFIT),
            stats.safe_get(keys::NUMBER_OF_TRADES),
            stats.safe_get(keys::AVG_LOSS),
        ))
    }
}
