//! Domain types for Stratscore

pub mod oos;
pub mod order;
pub mod sample;

pub use oos::{OosRange, OutOfSampleRanges, RangeError};
pub use order::{OrderSide, TradeOrder};
pub use sample::{Direction, DirectionalResolver, PlResolver, PlType, SampleSelector, SampleType};
