//! Stability: how straight the equity curve is, signed by the direction of profit.
//!
//! The squared similarity between the daily equity curve and a straight line
//! through its first and last points. A declining curve scores negative.

use stratscore_core::numeric::round2;
use stratscore_core::stats::keys;
use stratscore_core::{
    DailyEquity, Direction, EquityCurveBuilder, Pearson, PlType, SimilarityMeasure,
};

use crate::metric::{Goal, Metric, MetricInfo, MetricInput, MetricOutput, Precision};

pub fn info() -> MetricInfo {
    MetricInfo {
        tooltip: Some("Stability - how straight and steep is the equity curve"),
        precision: Precision::Decimal2,
        goal: Goal::Maximize,
        range: (0.0, 1.0),
        dependencies: &[keys::NET_PROFIT],
        pl_type_restriction: Some(PlType::Money),
        direction_restriction: Some(Direction::Both),
        ..MetricInfo::new(keys::STABILITY, "Stability")
    }
}

/// Points of the line from `curve[0]` towards `curve[n - 1]`, sampled at each
/// index. The slope runs over `n` steps, so the last point stops one step short
/// of the curve's final value.
pub fn reference_line(curve: &[f64]) -> Vec<f64> {
    let (Some(&y1), Some(&y2)) = (curve.first(), curve.last()) else {
        return Vec::new();
    };
    let n = curve.len() as f64;
    let slope = (y2 - y1) / n;
    (0..curve.len()).map(|i| y1 + slope * i as f64).collect()
}

pub struct Stability {
    equity: Box<dyn EquityCurveBuilder>,
    similarity: Box<dyn SimilarityMeasure>,
}

impl Stability {
    pub fn new(equity: Box<dyn EquityCurveBuilder>, similarity: Box<dyn SimilarityMeasure>) -> Self {
        Self { equity, similarity }
    }

    /// Stability of an already-built equity curve.
    pub fn score_curve(&self, curve: &[f64], net_profit: f64) -> f64 {
        let line = reference_line(curve);
        if line.is_empty() {
            return 0.0;
        }
        let mut stability = self.similarity.similarity(curve, &line).powi(2);
        if net_profit < 0.0 {
            stability = -stability;
        }
        round2(stability)
    }
}

impl Default for Stability {
    fn default() -> Self {
        Self::new(Box::new(DailyEquity), Box::new(Pearson))
    }
}

impl Metric for Stability {
    fn compute(&self, input: &MetricInput<'_>) -> MetricOutput {
        if input.orders.is_empty() {
            tracing::debug!("no orders, stability defaults to 0");
            return MetricOutput::value(0.0);
        }
        let curve = self.equity.build(input.orders, PlType::Money);
        MetricOutput::value(self.score_curve(&curve, input.stats.safe_get(keys::NET_PROFIT)))
    }
}
