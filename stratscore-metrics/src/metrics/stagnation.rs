//! Stagnation: the longest stretch in which equity fails to make a new high.
//!
//! A single forward scan tracks running balance and the last equity peak. A
//! stagnation window opens when an order leaves the balance at or below the
//! peak and closes at the next new high. Windows never straddle a walk-forward
//! boundary: their end is clipped to the in-sample / out-of-sample edge.

use chrono::{DateTime, Duration, Utc};

use stratscore_core::numeric::{days_between, round2, safe_divide};
use stratscore_core::stats::keys;
use stratscore_core::{
    DirectionalResolver, OutOfSampleRanges, PlResolver, SampleSelector, SampleType, TradeOrder,
};

use crate::metric::{Goal, Metric, MetricInfo, MetricInput, MetricOutput, Precision};

pub fn info() -> MetricInfo {
    MetricInfo {
        tooltip: Some("Stagnation in Days"),
        precision: Precision::Integer,
        goal: Goal::Minimize,
        range: (0.0, 10_000.0),
        depends_on_trading_period: true,
        ..MetricInfo::new(keys::STAGNATION, "Stagnation")
    }
}

/// Clip a stagnation window's end so it does not cross a sample boundary.
///
/// In-sample: the first range ending after `start` caps `end` at its start.
/// Out-of-sample: a range containing `start` caps `end` at its end; if `start`
/// lies before a later range, `end` is capped at the previous range's end.
pub fn correct_stagnation_end_time(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    oos: Option<&OutOfSampleRanges>,
    sample: SampleType,
) -> DateTime<Utc> {
    let Some(oos) = oos else {
        return end;
    };
    let ranges = oos.ranges();

    for (index, range) in ranges.iter().enumerate() {
        match sample {
            SampleType::InSample if start < range.date_to => {
                return end.min(range.date_from);
            }
            SampleType::OutOfSample if range.contains(start) => {
                return end.min(range.date_to);
            }
            SampleType::OutOfSample if start < range.date_from && index > 0 => {
                return end.min(ranges[index - 1].date_to);
            }
            _ => {}
        }
    }
    end
}

/// Result of a stagnation scan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StagnationReport {
    /// Longest stagnation in whole days.
    pub days: i64,
    /// Close time of the peak order that opened the longest window.
    pub from: Option<DateTime<Utc>>,
    /// Boundary-clipped end of the longest window.
    pub to: Option<DateTime<Utc>>,
    /// Whole days from the first order's open to the last order's close.
    pub total_days: i64,
    /// `days` as a percentage of `total_days`, rounded to 2 decimals.
    pub period_pct: f64,
}

#[derive(Debug, Clone, Copy)]
struct Window<'a> {
    first: &'a TradeOrder,
    last: &'a TradeOrder,
    period: Duration,
}

/// Mutable state threaded through the forward scan.
struct ScanState<'a> {
    balance: f64,
    profit_high: f64,
    peak: &'a TradeOrder,
    active: bool,
    best: Option<Window<'a>>,
}

impl<'a> ScanState<'a> {
    fn new(first: &'a TradeOrder) -> Self {
        Self {
            balance: 0.0,
            profit_high: 0.0,
            peak: first,
            active: false,
            best: None,
        }
    }

    /// Close the active window at `end`, keeping it if it is the longest so far.
    fn close_window(&mut self, last: &'a TradeOrder, end: DateTime<Utc>) {
        let period = end - self.peak.close_time;
        let best_period = self.best.map_or(Duration::zero(), |w| w.period);
        if period > best_period {
            self.best = Some(Window {
                first: self.peak,
                last,
                period,
            });
        }
    }
}

/// Scan `orders` for the longest stagnation window.
pub fn detect_stagnation(
    orders: &[TradeOrder],
    selector: &SampleSelector,
    resolver: &dyn PlResolver,
    oos: Option<&OutOfSampleRanges>,
) -> StagnationReport {
    let (Some(first), Some(last)) = (orders.first(), orders.last()) else {
        return StagnationReport::default();
    };
    let sample = selector.sample;
    let mut state = ScanState::new(first);

    for order in orders {
        state.balance += resolver.pl_for(order, selector);

        let end = if state.active {
            correct_stagnation_end_time(state.peak.close_time, order.close_time, oos, sample)
        } else {
            order.close_time
        };

        if state.balance > state.profit_high || end != order.close_time {
            if state.active {
                state.close_window(order, end);
            }
            state.peak = order;
            state.profit_high = state.balance;
            state.active = false;
        } else {
            state.active = true;
        }
    }

    if state.active {
        let end = correct_stagnation_end_time(state.peak.close_time, last.close_time, oos, sample);
        state.close_window(last, end);
    }

    let total_days = days_between(first.open_time, last.close_time);

    let Some(best) = state.best else {
        return StagnationReport {
            total_days,
            ..StagnationReport::default()
        };
    };

    let from = best.first.close_time;
    let to = correct_stagnation_end_time(from, best.last.close_time, oos, sample);
    let days = days_between(from, to);

    StagnationReport {
        days,
        from: Some(from),
        to: Some(to),
        total_days,
        period_pct: round2(safe_divide(days as f64, total_days as f64) * 100.0),
    }
}

/// Stagnation metric. Writes the window bounds (Unix milliseconds, 0 when no
/// window exists) and its share of the history as side outputs.
pub struct Stagnation {
    resolver: Box<dyn PlResolver + Send + Sync>,
}

impl Stagnation {
    pub fn new(resolver: Box<dyn PlResolver + Send + Sync>) -> Self {
        Self { resolver }
    }
}

impl Default for Stagnation {
    fn default() -> Self {
        Self::new(Box::new(DirectionalResolver))
    }
}

impl Metric for Stagnation {
    fn compute(&self, input: &MetricInput<'_>) -> MetricOutput {
        let report = detect_stagnation(
            input.orders,
            &input.selector,
            self.resolver.as_ref(),
            input.oos,
        );
        let millis = |t: Option<DateTime<Utc>>| t.map_or(0.0, |t| t.timestamp_millis() as f64);

        MetricOutput::value(report.days as f64)
            .with_side_output(keys::STAGNATION_FROM, millis(report.from))
            .with_side_output(keys::STAGNATION_TO, millis(report.to))
            .with_side_output(keys::STAGNATION_PERIOD_PCT, report.period_pct)
    }
}
