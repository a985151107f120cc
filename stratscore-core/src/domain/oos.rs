//! Out-of-sample windows of a walk-forward split.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::order::TradeOrder;

/// A single out-of-sample window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OosRange {
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
}

impl OosRange {
    pub fn new(date_from: DateTime<Utc>, date_to: DateTime<Utc>) -> Self {
        Self { date_from, date_to }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.date_from && instant <= self.date_to
    }
}

/// Errors from building an [`OutOfSampleRanges`] list.
#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("range {index} ends before it starts ({from} > {to})")]
    Inverted {
        index: usize,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    #[error("range {index} starts at {from}, before range {prev} ends at {prev_to}")]
    Overlapping {
        index: usize,
        prev: usize,
        from: DateTime<Utc>,
        prev_to: DateTime<Utc>,
    },
}

/// Ordered, non-overlapping out-of-sample windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OosRange>", into = "Vec<OosRange>")]
pub struct OutOfSampleRanges {
    ranges: Vec<OosRange>,
}

impl OutOfSampleRanges {
    /// Validate and wrap a list of ranges. Ranges must be sorted and may touch
    /// but not overlap.
    pub fn new(ranges: Vec<OosRange>) -> Result<Self, RangeError> {
        for (index, range) in ranges.iter().enumerate() {
            if range.date_from > range.date_to {
                return Err(RangeError::Inverted {
                    index,
                    from: range.date_from,
                    to: range.date_to,
                });
            }
            if index > 0 {
                let prev = &ranges[index - 1];
                if range.date_from < prev.date_to {
                    return Err(RangeError::Overlapping {
                        index,
                        prev: index - 1,
                        from: range.date_from,
                        prev_to: prev.date_to,
                    });
                }
            }
        }
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[OosRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether `instant` falls inside any out-of-sample window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.ranges.iter().any(|r| r.contains(instant))
    }

    /// Partition orders by close time into (in-sample, out-of-sample), keeping
    /// the original order within each half.
    pub fn split(&self, orders: &[TradeOrder]) -> (Vec<TradeOrder>, Vec<TradeOrder>) {
        orders
            .iter()
            .cloned()
            .partition(|o| !self.contains(o.close_time))
    }
}

impl TryFrom<Vec<OosRange>> for OutOfSampleRanges {
    type Error = RangeError;

    fn try_from(ranges: Vec<OosRange>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<OutOfSampleRanges> for Vec<OosRange> {
    fn from(value: OutOfSampleRanges) -> Self {
        value.ranges
    }
}
