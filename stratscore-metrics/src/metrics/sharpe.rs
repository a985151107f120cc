//! Annualized Sharpe ratio over a weekday-bucketed daily return series.
//!
//! Every weekday between the first and last close gets a bucket that starts at
//! minus the daily benchmark, so idle days are penalized. Each order's percent
//! P/L is added to the bucket of its close day.

use stratscore_core::numeric::{
    day_start, days_between, is_weekend, mean, round2, safe_divide, sample_std_dev,
    weekday_index,
};
use stratscore_core::stats::keys;
use stratscore_core::{Direction, PlType, TradeOrder};

use crate::metric::{Goal, Metric, MetricInfo, MetricInput, MetricOutput, Precision};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Yearly return every day is measured against.
pub const BENCHMARK_ANNUAL_RETURN: f64 = 0.05;

pub fn info() -> MetricInfo {
    MetricInfo {
        tooltip: Some("Sharpe Ratio (annualized)"),
        precision: Precision::Decimal2,
        goal: Goal::Maximize,
        range: (-1.0, 1.0),
        pl_type_restriction: Some(PlType::Money),
        direction_restriction: Some(Direction::Both),
        ..MetricInfo::new(keys::SHARPE_RATIO, "Sharpe Ratio")
    }
}

/// Build the daily excess return series. `None` for an empty order list.
///
/// Bucket index arithmetic is kept exactly as historically calibrated: the
/// calendar offset loses 2 once it passes the first day's weekday number, then
/// 2 more per elapsed 7 days. Indices falling outside the series are dropped.
pub fn daily_returns(orders: &[TradeOrder]) -> Option<Vec<f64>> {
    let first = orders.iter().map(|o| o.close_time).min()?;
    let last = orders.iter().map(|o| o.close_time).max()?;

    let benchmark = BENCHMARK_ANNUAL_RETURN / TRADING_DAYS_PER_YEAR;
    let first_day = day_start(first);
    let first_dow = i64::from(weekday_index(first_day));

    let span = days_between(first_day, last);
    let mut returns = Vec::with_capacity(span as usize + 1);
    for offset in 0..=span {
        // Position in the Monday=1 .. Sunday=7 cycle
        let position = (first_dow - 1 + offset) % 7 + 1;
        if position < 6 {
            returns.push(-benchmark);
        }
    }

    for order in orders {
        if is_weekend(order.close_time) {
            continue;
        }
        let mut index = days_between(first_day, day_start(order.close_time));
        if index > first_dow {
            index -= 2;
        }
        index -= (index / 7) * 2;

        if index < 0 || index as usize >= returns.len() {
            continue;
        }
        returns[index as usize] += order.percent_profit_loss;
    }

    Some(returns)
}

/// Annualized Sharpe ratio, 0 for an empty history or a flat return series.
pub fn sharpe_ratio(orders: &[TradeOrder]) -> f64 {
    let Some(returns) = daily_returns(orders) else {
        tracing::debug!("no orders, sharpe ratio defaults to 0");
        return 0.0;
    };
    let m = mean(&returns);
    let sd = sample_std_dev(&returns);
    round2(TRADING_DAYS_PER_YEAR.sqrt() * safe_divide(m, sd))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SharpeRatio;

impl Metric for SharpeRatio {
    fn compute(&self, input: &MetricInput<'_>) -> MetricOutput {
        MetricOutput::value(sharpe_ratio(input.orders))
    }
}
