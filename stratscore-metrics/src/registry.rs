//! Metric registry: name → (metadata, implementation).

use stratscore_core::{AggregatedStats, OutOfSampleRanges, SampleSelector, TradeOrder};

use crate::metric::{Metric, MetricInfo, MetricInput};
use crate::metrics::{
    profit_factor, r_expectancy, return_dd, sharpe, stability, stagnation, ProfitFactor,
    RExpectancy, ReturnDdRatio, SharpeRatio, Stability, Stagnation,
};

struct Entry {
    info: MetricInfo,
    metric: Box<dyn Metric>,
}

/// Ordered collection of metrics. Metrics run in registration order, so a
/// metric may read values produced by ones registered before it.
#[derive(Default)]
pub struct MetricRegistry {
    entries: Vec<Entry>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six standard metrics, ratio metrics first.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(profit_factor::info(), Box::new(ProfitFactor));
        registry.register(return_dd::info(), Box::new(ReturnDdRatio));
        registry.register(r_expectancy::info(), Box::new(RExpectancy));
        registry.register(sharpe::info(), Box::new(SharpeRatio));
        registry.register(stability::info(), Box::new(Stability::default()));
        registry.register(stagnation::info(), Box::new(Stagnation::default()));
        registry
    }

    /// Register a metric, replacing any existing one with the same name.
    pub fn register(&mut self, info: MetricInfo, metric: Box<dyn Metric>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.info.name == info.name) {
            *entry = Entry { info, metric };
        } else {
            self.entries.push(Entry { info, metric });
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Metric> {
        self.entry(name).map(|e| e.metric.as_ref())
    }

    pub fn info(&self, name: &str) -> Option<&MetricInfo> {
        self.entry(name).map(|e| &e.info)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.info.name)
    }

    pub fn infos(&self) -> impl Iterator<Item = &MetricInfo> {
        self.entries.iter().map(|e| &e.info)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every metric admitted by `selector` and return `stats` extended
    /// with their values and side outputs. Restricted metrics are skipped and
    /// leave their key absent.
    pub fn compute_all(
        &self,
        stats: &AggregatedStats,
        orders: &[TradeOrder],
        selector: SampleSelector,
        oos: Option<&OutOfSampleRanges>,
    ) -> AggregatedStats {
        let mut out = stats.clone();
        for entry in &self.entries {
            if !entry.info.admits(&selector) {
                tracing::debug!(metric = entry.info.name, ?selector, "skipped by restriction");
                continue;
            }
            let input = MetricInput {
                stats: &out,
                orders,
                selector,
                oos,
            };
            let output = entry.metric.compute(&input);
            tracing::debug!(metric = entry.info.name, value = output.value, "computed");

            out.set(entry.info.name, output.value);
            for (key, value) in output.side_outputs {
                out.set(key, value);
            }
        }
        out
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.info.name == name)
    }
}
