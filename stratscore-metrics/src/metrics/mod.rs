//! Metric implementations. Each module pairs a `Metric` impl with its `info()`
//! metadata record and exposes the underlying pure function.

pub mod profit_factor;
pub mod r_expectancy;
pub mod return_dd;
pub mod sharpe;
pub mod stability;
pub mod stagnation;

pub use profit_factor::ProfitFactor;
pub use r_expectancy::RExpectancy;
pub use return_dd::ReturnDdRatio;
pub use sharpe::SharpeRatio;
pub use stability::Stability;
pub use stagnation::{detect_stagnation, Stagnation, StagnationReport};
