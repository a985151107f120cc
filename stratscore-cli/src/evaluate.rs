//! One strategy evaluation: sample selection, aggregation, metrics, score.

use serde::Serialize;

use stratscore_core::{
    AggregatedStats, DirectionalResolver, OutOfSampleRanges, SampleSelector, SampleType,
    TradeOrder,
};
use stratscore_metrics::{composite_score, CompositeWeights, MetricRegistry};

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub selector: SampleSelector,
    /// Orders in the selected sample, before direction filtering.
    pub orders: usize,
    pub stats: AggregatedStats,
    pub score: f64,
}

/// Orders belonging to `sample`. Without ranges every order is in-sample and
/// the out-of-sample half is empty.
pub fn select_sample(
    orders: &[TradeOrder],
    oos: Option<&OutOfSampleRanges>,
    sample: SampleType,
) -> Vec<TradeOrder> {
    match (oos, sample) {
        (None, SampleType::InSample) => orders.to_vec(),
        (None, SampleType::OutOfSample) => Vec::new(),
        (Some(ranges), sample) => {
            let (in_sample, out_of_sample) = ranges.split(orders);
            match sample {
                SampleType::InSample => in_sample,
                SampleType::OutOfSample => out_of_sample,
            }
        }
    }
}

pub fn evaluate(
    registry: &MetricRegistry,
    orders: &[TradeOrder],
    selector: SampleSelector,
    oos: Option<&OutOfSampleRanges>,
    weights: &CompositeWeights,
) -> Evaluation {
    let sample = select_sample(orders, oos, selector.sample);
    let base = AggregatedStats::from_orders(&sample, &selector, &DirectionalResolver);
    let stats = registry.compute_all(&base, &sample, selector, oos);
    let score = composite_score(&stats, weights);
    tracing::debug!(orders = sample.len(), score, "evaluated");

    Evaluation {
        selector,
        orders: sample.len(),
        stats,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stratscore_core::stats::keys;
    use stratscore_core::{OosRange, OrderSide};

    fn order(day: u32, pl: f64) -> TradeOrder {
        let t = Utc.with_ymd_and_hms(2024, 1, day, 15, 0, 0).unwrap();
        TradeOrder::new(OrderSide::Long, t, t, pl, pl / 100.0)
    }

    fn oos() -> OutOfSampleRanges {
        OutOfSampleRanges::new(vec![OosRange::new(
            Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap(),
        )])
        .unwrap()
    }

    #[test]
    fn sample_selection() {
        let orders = vec![order(2, 1.0), order(9, 2.0), order(16, 3.0)];
        assert_eq!(select_sample(&orders, None, SampleType::InSample).len(), 3);
        assert!(select_sample(&orders, None, SampleType::OutOfSample).is_empty());

        let ranges = oos();
        let is = select_sample(&orders, Some(&ranges), SampleType::InSample);
        let os = select_sample(&orders, Some(&ranges), SampleType::OutOfSample);
        assert_eq!(is.len(), 2);
        assert_eq!(os.len(), 1);
        assert_eq!(os[0].profit_loss, 2.0);
    }

    #[test]
    fn out_of_sample_evaluation_uses_only_oos_orders() {
        let orders = vec![order(2, 100.0), order(9, -30.0), order(10, 50.0), order(16, 75.0)];
        let ranges = oos();
        let eval = evaluate(
            &MetricRegistry::standard(),
            &orders,
            SampleSelector::out_of_sample(),
            Some(&ranges),
            &CompositeWeights::default(),
        );
        assert_eq!(eval.orders, 2);
        assert_eq!(eval.stats.get(keys::NET_PROFIT), Some(20.0));
        assert!((0.0..=100.0).contains(&eval.score));
    }

    #[test]
    fn empty_history_scores_zero() {
        let eval = evaluate(
            &MetricRegistry::standard(),
            &[],
            SampleSelector::default(),
            None,
            &CompositeWeights::default(),
        );
        assert_eq!(eval.orders, 0);
        assert_eq!(eval.score, 0.0);
    }
}
