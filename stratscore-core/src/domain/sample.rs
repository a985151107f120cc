//! Sample selection: which slice of a trade history a statistic is computed over.
//!
//! A [`SampleSelector`] combines a direction filter, the P/L column to read and
//! the in-sample / out-of-sample half of a walk-forward split.

use serde::{Deserialize, Serialize};

use super::order::{OrderSide, TradeOrder};

/// Which trade directions contribute P/L.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Both,
    LongOnly,
    ShortOnly,
}

impl Direction {
    pub fn admits(&self, side: OrderSide) -> bool {
        match self {
            Self::Both => true,
            Self::LongOnly => side == OrderSide::Long,
            Self::ShortOnly => side == OrderSide::Short,
        }
    }
}

/// Which P/L column is read from an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlType {
    #[default]
    Money,
    Percent,
}

/// In-sample (fitting window) or out-of-sample (validation window).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    #[default]
    InSample,
    OutOfSample,
}

/// Full statistics selector: direction x P/L column x sample half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleSelector {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub pl_type: PlType,
    #[serde(default)]
    pub sample: SampleType,
}

impl SampleSelector {
    pub fn new(direction: Direction, pl_type: PlType, sample: SampleType) -> Self {
        Self {
            direction,
            pl_type,
            sample,
        }
    }

    pub fn in_sample() -> Self {
        Self::default()
    }

    pub fn out_of_sample() -> Self {
        Self {
            sample: SampleType::OutOfSample,
            ..Self::default()
        }
    }
}

/// Resolves the signed P/L an order contributes under a selector.
pub trait PlResolver {
    fn pl_for(&self, order: &TradeOrder, selector: &SampleSelector) -> f64;
}

/// Default resolver: the selected P/L column when the order's side passes the
/// direction filter, otherwise 0.0.
///
/// Sample membership is not checked here; callers pass the orders belonging to
/// the selected sample (see [`super::OutOfSampleRanges::split`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionalResolver;

impl PlResolver for DirectionalResolver {
    fn pl_for(&self, order: &TradeOrder, selector: &SampleSelector) -> f64 {
        if !selector.direction.admits(order.side) {
            return 0.0;
        }
        match selector.pl_type {
            PlType::Money => order.profit_loss,
            PlType::Percent => order.percent_profit_loss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn order(side: OrderSide) -> TradeOrder {
        let t = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        TradeOrder::new(side, t, t, 250.0, 1.25)
    }

    #[test]
    fn both_direction_reads_money_by_default() {
        let sel = SampleSelector::default();
        assert_eq!(DirectionalResolver.pl_for(&order(OrderSide::Short), &sel), 250.0);
    }

    #[test]
    fn direction_filter_zeroes_other_side() {
        let sel = SampleSelector::new(Direction::LongOnly, PlType::Money, SampleType::InSample);
        assert_eq!(DirectionalResolver.pl_for(&order(OrderSide::Short), &sel), 0.0);
        assert_eq!(DirectionalResolver.pl_for(&order(OrderSide::Long), &sel), 250.0);
    }

    #[test]
    fn percent_column() {
        let sel = SampleSelector::new(Direction::ShortOnly, PlType::Percent, SampleType::OutOfSample);
        assert_eq!(DirectionalResolver.pl_for(&order(OrderSide::Short), &sel), 1.25);
    }

    #[test]
    fn selector_deserializes_with_defaults() {
        let sel: SampleSelector = serde_json::from_str(r#"{"sample":"out_of_sample"}"#).unwrap();
        assert_eq!(sel, SampleSelector::out_of_sample());
    }
}
