//! Deterministic synthetic trade histories for demos and benchmarks.
//!
//! Synthetic orders are developer-only data. The same seed always yields the
//! same history.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{OrderSide, TradeOrder};

/// Generate `count` closed trades starting at `start`, one per weekday.
///
/// P/L is drawn around a small positive edge; percent P/L is the money P/L
/// relative to a notional 100k account.
pub fn generate_orders(count: usize, start: DateTime<Utc>, seed: u64) -> Vec<TradeOrder> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);
    let mut open = start;

    while orders.len() < count {
        let weekday = open.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            open += Duration::days(1);
            continue;
        }

        let hold_hours: i64 = rng.gen_range(1..8);
        let close = open + Duration::hours(hold_hours);
        let pl: f64 = rng.gen_range(-400.0..500.0);
        let side = if rng.gen_bool(0.5) {
            OrderSide::Long
        } else {
            OrderSide::Short
        };

        orders.push(TradeOrder::new(side, open, close, pl, pl / 1_000.0));
        open += Duration::days(1);
    }
    orders
}
