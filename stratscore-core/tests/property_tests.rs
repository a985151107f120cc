//! Property tests for the core data model.
//!
//! Uses proptest to verify:
//! 1. Aggregation identities: gross profit minus gross loss is net profit,
//!    drawdown and gross loss are magnitudes, average loss is never positive
//! 2. Direction filtering: long and short aggregates partition the whole
//! 3. Daily equity ends at the total P/L of the history
//! 4. Out-of-sample split is a partition of the order list

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use stratscore_core::stats::keys;
use stratscore_core::{
    AggregatedStats, DailyEquity, Direction, DirectionalResolver, EquityCurveBuilder, OosRange,
    OrderSide, OutOfSampleRanges, PlType, SampleSelector, SampleType, TradeOrder,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn arb_side() -> impl Strategy<Value = OrderSide> {
    prop_oneof![Just(OrderSide::Long), Just(OrderSide::Short)]
}

/// Chronological orders: each closes 0..3 days after the previous one.
fn arb_orders() -> impl Strategy<Value = Vec<TradeOrder>> {
    prop::collection::vec((arb_side(), 0i64..3, -500.0..500.0_f64), 1..60).prop_map(|rows| {
        let mut close = base();
        rows.into_iter()
            .map(|(side, gap, pl)| {
                close += Duration::days(gap);
                let pl = (pl * 100.0).round() / 100.0;
                TradeOrder::new(side, close - Duration::hours(2), close, pl, pl / 100.0)
            })
            .collect()
    })
}

fn aggregate(orders: &[TradeOrder], direction: Direction) -> AggregatedStats {
    let selector = SampleSelector::new(direction, PlType::Money, SampleType::InSample);
    AggregatedStats::from_orders(orders, &selector, &DirectionalResolver)
}

// ── 1. Aggregation identities ────────────────────────────────────────

proptest! {
    #[test]
    fn gross_profit_minus_gross_loss_is_net(orders in arb_orders()) {
        let stats = aggregate(&orders, Direction::Both);
        let net = stats.safe_get(keys::NET_PROFIT);
        let gp = stats.safe_get(keys::GROSS_PROFIT);
        let gl = stats.safe_get(keys::GROSS_LOSS);
        prop_assert!((gp - gl - net).abs() < 1e-6);
        prop_assert!(gp >= 0.0);
        prop_assert!(gl >= 0.0);
    }

    #[test]
    fn drawdown_is_a_bounded_magnitude(orders in arb_orders()) {
        let stats = aggregate(&orders, Direction::Both);
        let dd = stats.safe_get(keys::DRAWDOWN);
        prop_assert!(dd >= 0.0);
        // A drawdown can never exceed the total of all losses
        prop_assert!(dd <= stats.safe_get(keys::GROSS_LOSS) + 1e-6);
        prop_assert!(stats.safe_get(keys::AVG_LOSS) <= 0.0);
    }
}

// ── 2. Direction filtering ───────────────────────────────────────────

proptest! {
    #[test]
    fn long_and_short_partition_both(orders in arb_orders()) {
        let both = aggregate(&orders, Direction::Both);
        let long = aggregate(&orders, Direction::LongOnly);
        let short = aggregate(&orders, Direction::ShortOnly);

        prop_assert_eq!(
            long.safe_get(keys::NUMBER_OF_TRADES) + short.safe_get(keys::NUMBER_OF_TRADES),
            both.safe_get(keys::NUMBER_OF_TRADES)
        );
        let net_sum = long.safe_get(keys::NET_PROFIT) + short.safe_get(keys::NET_PROFIT);
        prop_assert!((net_sum - both.safe_get(keys::NET_PROFIT)).abs() < 1e-6);
    }
}

// ── 3. Daily equity ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn daily_equity_ends_at_total_pl(orders in arb_orders()) {
        let curve = DailyEquity.build(&orders, PlType::Money);
        let total: f64 = orders.iter().map(|o| o.profit_loss).sum();
        prop_assert!(!curve.is_empty());
        prop_assert!((curve[curve.len() - 1] - total).abs() < 1e-6);
    }
}

// ── 4. Out-of-sample split ───────────────────────────────────────────

proptest! {
    #[test]
    fn split_partitions_orders(orders in arb_orders(), from in 0i64..30, len in 1i64..30) {
        let start = base() + Duration::days(from);
        let oos = OutOfSampleRanges::new(vec![OosRange::new(start, start + Duration::days(len))])
            .unwrap();
        let (is, os) = oos.split(&orders);

        prop_assert_eq!(is.len() + os.len(), orders.len());
        prop_assert!(is.iter().all(|o| !oos.contains(o.close_time)));
        prop_assert!(os.iter().all(|o| oos.contains(o.close_time)));
    }
}
