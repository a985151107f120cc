//! Composite score: weighted blend of six metrics mapped onto 0..100, and the
//! pass/fail strategy filter built on it.

use serde::{Deserialize, Serialize};
use std::num::ParseFloatError;
use thiserror::Error;

use stratscore_core::stats::keys;
use stratscore_core::AggregatedStats;

/// A metric contributing to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreComponent {
    ReturnDdRatio,
    Stability,
    ProfitFactor,
    SharpeRatio,
    RExpectancy,
    Stagnation,
}

impl ScoreComponent {
    pub const ALL: [ScoreComponent; 6] = [
        Self::ReturnDdRatio,
        Self::Stability,
        Self::ProfitFactor,
        Self::SharpeRatio,
        Self::RExpectancy,
        Self::Stagnation,
    ];

    /// Statistic key the component is read from.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ReturnDdRatio => keys::RETURN_DD_RATIO,
            Self::Stability => keys::STABILITY,
            Self::ProfitFactor => keys::PROFIT_FACTOR,
            Self::SharpeRatio => keys::SHARPE_RATIO,
            Self::RExpectancy => keys::R_EXPECTANCY,
            Self::Stagnation => keys::STAGNATION,
        }
    }

    /// Extract the component value; missing or non-finite reads as 0.0.
    pub fn extract(&self, stats: &AggregatedStats) -> f64 {
        stats.safe_get(self.key())
    }

    /// Signed weight: stagnation days are a penalty.
    pub fn weight(&self, weights: &CompositeWeights) -> f64 {
        match self {
            Self::ReturnDdRatio => weights.ret_dd,
            Self::Stability => weights.stability,
            Self::ProfitFactor => weights.profit_factor,
            Self::SharpeRatio => weights.sharpe,
            Self::RExpectancy => weights.r_expectancy,
            Self::Stagnation => -weights.stagnation_penalty,
        }
    }
}

/// Weights and the raw range that maps onto 0..100.
///
/// The raw range [0, 20] is an empirical calibration, not a derived bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeWeights {
    pub ret_dd: f64,
    pub stability: f64,
    pub profit_factor: f64,
    pub sharpe: f64,
    pub r_expectancy: f64,
    /// Subtracted per stagnation day.
    pub stagnation_penalty: f64,
    pub raw_min: f64,
    pub raw_max: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            ret_dd: 1.4,
            stability: 3.8,
            profit_factor: 2.2,
            sharpe: 1.6,
            r_expectancy: 0.6,
            stagnation_penalty: 0.008,
            raw_min: 0.0,
            raw_max: 20.0,
        }
    }
}

/// Weighted sum of the six components, before normalization.
pub fn raw_score(stats: &AggregatedStats, weights: &CompositeWeights) -> f64 {
    ScoreComponent::ALL
        .iter()
        .map(|c| c.weight(weights) * c.extract(stats))
        .sum()
}

/// Composite score in [0, 100].
///
/// The raw score is mapped linearly from `[raw_min, raw_max]` onto `[0, 100]`
/// and clamped. An empty or inverted raw range scores 0.
pub fn composite_score(stats: &AggregatedStats, weights: &CompositeWeights) -> f64 {
    let raw = raw_score(stats, weights);
    let span = weights.raw_max - weights.raw_min;
    if span.is_nan() || span <= 0.0 {
        return 0.0;
    }
    let norm = 100.0 * (raw - weights.raw_min) / span;
    if norm.is_nan() {
        return 0.0;
    }
    norm.clamp(0.0, 100.0)
}

/// Errors from the strategy filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter threshold {input:?}: {source}")]
    InvalidThreshold {
        input: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parse a threshold argument. Surrounding whitespace is ignored.
pub fn parse_threshold(input: &str) -> Result<f64, FilterError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|source| FilterError::InvalidThreshold {
            input: input.to_string(),
            source,
        })
}

/// Pass/fail filter over the composite score.
#[derive(Debug, Clone, Default)]
pub struct StrategyFilter {
    pub weights: CompositeWeights,
}

impl StrategyFilter {
    pub fn new(weights: CompositeWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, stats: &AggregatedStats) -> f64 {
        composite_score(stats, &self.weights)
    }

    /// Whether the strategy's composite score reaches `threshold`.
    ///
    /// A malformed threshold is a configuration error and is returned, never
    /// replaced by a default.
    pub fn filter_strategy(
        &self,
        stats: &AggregatedStats,
        threshold: &str,
    ) -> Result<bool, FilterError> {
        let threshold = parse_threshold(threshold)?;
        let score = self.score(stats);
        let passed = score >= threshold;
        tracing::info!(score, threshold, passed, "strategy filter");
        Ok(passed)
    }

    /// Batch entry point. Selection happens per result in
    /// [`Self::filter_strategy`]; the batch is returned unchanged.
    pub fn process_batch<T>(&self, results: Vec<T>) -> Vec<T> {
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(pairs: &[(&str, f64)]) -> AggregatedStats {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn empty_stats_score_zero() {
        assert_eq!(composite_score(&AggregatedStats::new(), &CompositeWeights::default()), 0.0);
    }

    #[test]
    fn midpoint_raw_is_fifty() {
        // 1.6 * 6.25 = 10 → halfway through [0, 20]
        let s = stats(&[(keys::SHARPE_RATIO, 6.25)]);
        assert!((composite_score(&s, &CompositeWeights::default()) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn all_components_weighted() {
        let s = stats(&[
            (keys::RETURN_DD_RATIO, 2.0),
            (keys::STABILITY, 0.5),
            (keys::PROFIT_FACTOR, 1.5),
            (keys::SHARPE_RATIO, 1.0),
            (keys::R_EXPECTANCY, 0.5),
            (keys::STAGNATION, 125.0),
        ]);
        // 2.8 + 1.9 + 3.3 + 1.6 + 0.3 - 1.0 = 8.9
        let raw = raw_score(&s, &CompositeWeights::default());
        assert!((raw - 8.9).abs() < 1e-9);
        assert!((composite_score(&s, &CompositeWeights::default()) - 44.5).abs() < 1e-9);
    }

    #[test]
    fn sentinel_values_clamp_to_hundred() {
        let s = stats(&[(keys::R_EXPECTANCY, 99_999.0)]);
        assert_eq!(composite_score(&s, &CompositeWeights::default()), 100.0);
    }

    #[test]
    fn long_stagnation_clamps_to_zero() {
        let s = stats(&[(keys::PROFIT_FACTOR, 2.0), (keys::STAGNATION, 5_000.0)]);
        assert_eq!(composite_score(&s, &CompositeWeights::default()), 0.0);
    }

    #[test]
    fn non_finite_components_read_as_zero() {
        let s = stats(&[(keys::SHARPE_RATIO, f64::NAN), (keys::STABILITY, f64::INFINITY)]);
        assert_eq!(composite_score(&s, &CompositeWeights::default()), 0.0);
    }

    #[test]
    fn degenerate_raw_range_scores_zero() {
        let weights = CompositeWeights {
            raw_min: 5.0,
            raw_max: 5.0,
            ..CompositeWeights::default()
        };
        let s = stats(&[(keys::SHARPE_RATIO, 6.25)]);
        assert_eq!(composite_score(&s, &weights), 0.0);
    }

    #[test]
    fn filter_threshold_comparison() {
        let filter = StrategyFilter::default();
        let s = stats(&[(keys::SHARPE_RATIO, 6.25)]);
        assert!(filter.filter_strategy(&s, "50").unwrap());
        assert!(filter.filter_strategy(&s, "  50.0 \n").unwrap());
        assert!(!filter.filter_strategy(&s, "50.01").unwrap());
    }

    #[test]
    fn filter_rejects_malformed_threshold() {
        let filter = StrategyFilter::default();
        let err = filter
            .filter_strategy(&AggregatedStats::new(), "fifty")
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidThreshold { ref input, .. } if input == "fifty"));
        assert!(filter.filter_strategy(&AggregatedStats::new(), "   ").is_err());
    }

    #[test]
    fn batch_is_pass_through() {
        let filter = StrategyFilter::default();
        assert_eq!(filter.process_batch(vec![3, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn weights_deserialize_partially() {
        let w: CompositeWeights = toml::from_str("sharpe = 3.0").unwrap();
        assert_eq!(w.sharpe, 3.0);
        assert_eq!(w.ret_dd, 1.4);
    }
}
