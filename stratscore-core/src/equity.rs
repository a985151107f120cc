//! Daily equity curve: cumulative P/L sampled once per trading day.

use chrono::Duration;

use crate::domain::{PlType, TradeOrder};
use crate::numeric::{day_start, is_weekend};

/// Builds an equity curve (cumulative P/L, chronological) from an order list.
pub trait EquityCurveBuilder: Send + Sync {
    fn build(&self, orders: &[TradeOrder], pl_type: PlType) -> Vec<f64>;
}

/// One point per calendar day from the first to the last close day.
///
/// Saturdays and Sundays are skipped unless an order closed on them. Each point
/// is the cumulative P/L of every order closed on or before that day. Orders
/// must be sorted by close time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyEquity;

impl EquityCurveBuilder for DailyEquity {
    fn build(&self, orders: &[TradeOrder], pl_type: PlType) -> Vec<f64> {
        let (Some(first), Some(last)) = (
            orders.iter().map(|o| o.close_time).min(),
            orders.iter().map(|o| o.close_time).max(),
        ) else {
            return Vec::new();
        };

        let last_day = day_start(last);
        let mut day = day_start(first);
        let mut cursor = 0;
        let mut equity = 0.0;
        let mut curve = Vec::new();

        while day <= last_day {
            let mut closed_today = false;
            while cursor < orders.len() && day_start(orders[cursor].close_time) <= day {
                equity += match pl_type {
                    PlType::Money => orders[cursor].profit_loss,
                    PlType::Percent => orders[cursor].percent_profit_loss,
                };
                closed_today = true;
                cursor += 1;
            }
            if !is_weekend(day) || closed_today {
                curve.push(equity);
            }
            day += Duration::days(1);
        }
        curve
    }
}
