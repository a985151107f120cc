//! Stratscore Core: trade order model and the numeric plumbing shared by every metric.
//!
//! This crate contains:
//! - Domain types (trade orders, sample selectors, out-of-sample ranges)
//! - Aggregated statistics map with total (never-failing) lookups
//! - Numeric helpers (safe division, rounding, calendar-day arithmetic)
//! - Daily equity curve builder and series similarity
//! - Deterministic synthetic order generation for demos and benchmarks

pub mod domain;
pub mod equity;
pub mod numeric;
pub mod similarity;
pub mod stats;
pub mod synthetic;

pub use domain::{
    DirectionalResolver, Direction, OosRange, OrderSide, OutOfSampleRanges, PlResolver, PlType,
    RangeError, SampleSelector, SampleType, TradeOrder,
};
pub use equity::{DailyEquity, EquityCurveBuilder};
pub use similarity::{Pearson, SimilarityMeasure};
pub use stats::AggregatedStats;
