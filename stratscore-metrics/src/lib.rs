//! Stratscore Metrics: per-strategy performance metrics and the composite score.
//!
//! This crate builds on `stratscore-core` to provide:
//! - The `Metric` capability with its `MetricInfo` metadata record
//! - Profit factor, return/drawdown ratio, R expectancy, Sharpe ratio,
//!   stability and stagnation
//! - An ordered metric registry that extends aggregated statistics
//! - Composite 0..100 score and threshold filter
//! - TOML scoring configuration

pub mod composite;
pub mod config;
pub mod metric;
pub mod metrics;
pub mod registry;

pub use composite::{
    composite_score, parse_threshold, raw_score, CompositeWeights, FilterError, ScoreComponent,
    StrategyFilter,
};
pub use config::{ConfigError, ScoreConfig};
pub use metric::{Goal, Metric, MetricInfo, MetricInput, MetricOutput, Precision};
pub use metrics::{
    detect_stagnation, ProfitFactor, RExpectancy, ReturnDdRatio, SharpeRatio, Stability,
    Stagnation, StagnationReport,
};
pub use registry::MetricRegistry;
