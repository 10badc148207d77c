//! Rolling indicator engine.
//!
//! Free functions over a close-price slice, all aligned to the trailing edge
//! (most-recent bar = last element) with no look-ahead. Every function is
//! total: insufficient history and divide-by-zero conditions return the
//! documented neutral value instead of NaN or an error.

pub mod atr;
pub mod efficiency;
pub mod rsi;
pub mod snapshot;
pub mod volatility;

pub use atr::atr;
pub use efficiency::efficiency_ratio;
pub use rsi::rsi;
pub use snapshot::IndicatorSnapshot;
pub use volatility::volatility_z;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
