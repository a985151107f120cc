//! Numeric helpers shared by the metrics: safe division, rounding, calendar days.

use chrono::{DateTime, Datelike, NaiveTime, Utc};

/// `a / b`, or 0.0 when `b` is zero or the quotient is not finite.
pub fn safe_divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    let q = a / b;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Round to 2 decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to 4 decimals, half away from zero.
pub fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). 0.0 for fewer than 2 values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Midnight (UTC) of the day containing `instant`.
pub fn day_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Whole days from `from` to `to`, truncated toward zero.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

/// Day of week with Monday = 1 ... Sunday = 7.
pub fn weekday_index(instant: DateTime<Utc>) -> u32 {
    instant.weekday().number_from_monday()
}

pub fn is_weekend(instant: DateTime<Utc>) -> bool {
    weekday_index(instant) >= 6
}
