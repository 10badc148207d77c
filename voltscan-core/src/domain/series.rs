//! PriceSeries — the fundamental market data unit.

use serde::{Deserialize, Serialize};

/// Ordered sequence of closing prices, most-recent last.
///
/// A series may be shorter than any rolling window; indicators are defined to
/// return neutral values in that case, so construction never fails on length.
/// Non-finite entries are dropped at the boundary — the indicator engine
/// assumes finite inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from raw closes, silently dropping NaN/infinite values.
    pub fn new(closes: Vec<f64>) -> Self {
        let closes = closes.into_iter().filter(|c| c.is_finite()).collect();
        Self { closes }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Last (most recent) price, if any.
    pub fn last(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// True if the series is long enough to cover a trailing window of `n` bars.
    pub fn has_lookback(&self, n: usize) -> bool {
        self.closes.len() >= n
    }
}

impl From<Vec<f64>> for PriceSeries {
    fn from(closes: Vec<f64>) -> Self {
        Self::new(closes)
    }
}
