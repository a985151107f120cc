//! Profit factor: gross profit / gross loss.

use stratscore_core::numeric::round2;
use stratscore_core::stats::keys;

use crate::metric::{Goal, Metric, MetricInfo, MetricInput, MetricOutput, Precision};

/// Stands in for the undefined ratio when there are profits but no losses.
pub const NO_LOSS_PROFIT_FACTOR: f64 = 5.0;

pub fn info() -> MetricInfo {
    MetricInfo {
        tooltip: Some("Gross profit divided by gross loss"),
        precision: Precision::Decimal2,
        goal: Goal::Maximize,
        range: (0.0, 10.0),
        dependencies: &[
            keys::NET_PROFIT,
            keys::GROSS_PROFIT,
            keys::GROSS_LOSS,
            keys::NUMBER_OF_TRADES,
        ],
        ..MetricInfo::new(keys::PROFIT_FACTOR, "Profit factor")
    }
}

/// Profit factor from pre-aggregated values.
///
/// 0 with no trades; with zero gross loss, 0 when flat and
/// [`NO_LOSS_PROFIT_FACTOR`] otherwise.
pub fn profit_factor(net_profit: f64, gross_profit: f64, gross_loss: f64, trades: i64) -> f64 {
    if trades == 0 {
        return 0.0;
    }
    if gross_loss == 0.0 {
        if net_profit == 0.0 {
            return 0.0;
        }
        tracing::debug!(gross_profit, "no gross loss, profit factor uses sentinel");
        return NO_LOSS_PROFIT_FACTOR;
    }
    round2(gross_profit / gross_loss)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitFactor;

impl Metric for ProfitFactor {
    fn compute(&self, input: &MetricInput<'_>) -> MetricOutput {
        let stats = input.stats;
        MetricOutput::value(profit_factor(
            stats.safe_get(keys::NET_PROFIT),
            stats.safe_get(keys::GROSS_PROFIT),
            stats.safe_get(keys::GROSS_LOSS),
            stats.safe_get(keys::NUMBER_OF_TRADES) as i64,
        ))
    }
}
