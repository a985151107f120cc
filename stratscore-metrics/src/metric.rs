//! Metric capability and its metadata record.
//!
//! A metric is a single operation, `compute(input) -> output`. Display label,
//! precision, range and selector restrictions live in a plain [`MetricInfo`]
//! record registered next to the implementation.

use stratscore_core::{
    AggregatedStats, Direction, OutOfSampleRanges, PlType, SampleSelector, TradeOrder,
};

/// Everything a metric may read. Nothing here is mutated by a metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricInput<'a> {
    pub stats: &'a AggregatedStats,
    pub orders: &'a [TradeOrder],
    pub selector: SampleSelector,
    pub oos: Option<&'a OutOfSampleRanges>,
}

impl<'a> MetricInput<'a> {
    pub fn new(stats: &'a AggregatedStats, orders: &'a [TradeOrder]) -> Self {
        Self {
            stats,
            orders,
            selector: SampleSelector::default(),
            oos: None,
        }
    }

    pub fn with_selector(mut self, selector: SampleSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_oos(mut self, oos: Option<&'a OutOfSampleRanges>) -> Self {
        self.oos = oos;
        self
    }
}

/// A metric value plus any side statistics it reports for downstream use.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricOutput {
    pub value: f64,
    pub side_outputs: Vec<(&'static str, f64)>,
}

impl MetricOutput {
    pub fn value(value: f64) -> Self {
        Self {
            value,
            side_outputs: Vec::new(),
        }
    }

    pub fn with_side_output(mut self, key: &'static str, value: f64) -> Self {
        self.side_outputs.push((key, value));
        self
    }
}

/// A single metric computation. Must be total: degenerate input yields a
/// documented fallback value, never a panic or an error.
pub trait Metric: Send + Sync {
    fn compute(&self, input: &MetricInput<'_>) -> MetricOutput;
}

/// Display precision of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Integer,
    Decimal2,
    Decimal4,
}

/// Whether larger or smaller values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Maximize,
    Minimize,
}

/// Metadata attached to a registered metric.
#[derive(Debug, Clone)]
pub struct MetricInfo {
    /// Key under which the value is stored in [`AggregatedStats`].
    pub name: &'static str,
    pub label: &'static str,
    pub tooltip: Option<&'static str>,
    pub precision: Precision,
    pub goal: Goal,
    pub default_value: f64,
    /// Expected display range (min, max).
    pub range: (f64, f64),
    /// Statistic keys read through `safe_get`.
    pub dependencies: &'static [&'static str],
    /// Only computed for this P/L column, when set.
    pub pl_type_restriction: Option<PlType>,
    /// Only computed for this direction, when set.
    pub direction_restriction: Option<Direction>,
    /// Value scales with history length and must be normalized before
    /// comparing results with different trading periods.
    pub depends_on_trading_period: bool,
}

impl MetricInfo {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            tooltip: None,
            precision: Precision::Decimal2,
            goal: Goal::Maximize,
            default_value: 0.0,
            range: (0.0, 1.0),
            dependencies: &[],
            pl_type_restriction: None,
            direction_restriction: None,
            depends_on_trading_period: false,
        }
    }

    /// Whether this metric is computed for `selector`.
    pub fn admits(&self, selector: &SampleSelector) -> bool {
        self.pl_type_restriction
            .map_or(true, |pl| pl == selector.pl_type)
            && self
                .direction_restriction
                .map_or(true, |d| d == selector.direction)
    }

    /// Format a value with this metric's display precision.
    pub fn format(&self, value: f64) -> String {
        match self.precision {
            Precision::Integer => format!("{value:.0}"),
            Precision::Decimal2 => format!("{value:.2}"),
            Precision::Decimal4 => format!("{value:.4}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratscore_core::SampleType;

    #[test]
    fn unrestricted_admits_everything() {
        let info = MetricInfo::new("X", "x");
        let sel = SampleSelector::new(Direction::ShortOnly, PlType::Percent, SampleType::OutOfSample);
        assert!(info.admits(&sel));
    }

    #[test]
    fn restrictions_filter_selectors() {
        let info = MetricInfo {
            pl_type_restriction: Some(PlType::Money),
            direction_restriction: Some(Direction::Both),
            ..MetricInfo::new("X", "x")
        };
        assert!(info.admits(&SampleSelector::default()));
        assert!(info.admits(&SampleSelector::out_of_sample()));
        assert!(!info.admits(&SampleSelector::new(
            Direction::LongOnly,
            PlType::Money,
            SampleType::InSample
        )));
        assert!(!info.admits(&SampleSelector::new(
            Direction::Both,
            PlType::Percent,
            SampleType::InSample
        )));
    }

    #[test]
    fn formatting_follows_precision() {
        let mut info = MetricInfo::new("X", "x");
        assert_eq!(info.format(1.23456), "1.23");
        info.precision = Precision::Decimal4;
        assert_eq!(info.format(1.23456), "1.2346");
        info.precision = Precision::Integer;
        assert_eq!(info.format(42.0), "42");
    }
}
