//! Average True Range over close-only data.
//!
//! With only closes available (tick feeds have no intrabar high/low), the
//! true range of a bar collapses to the absolute bar-to-bar delta, and ATR is
//! the plain mean of those deltas over the trailing window.

/// Mean absolute bar-to-bar change over the trailing `window` deltas.
///
/// Needs `window + 1` closes to form `window` deltas; anything shorter
/// returns 0.0 (insufficient data is neutral, never an error).
pub fn atr(closes: &[f64], window: usize) -> f64 {
    let n = closes.len();
    if window == 0 || n < window + 1 {
        return 0.0;
    }

    let sum: f64 = closes[n - window - 1..]
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .sum();
    sum / window as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn mean_of_trailing_deltas() {
        // Deltas: 2, 3, 1 → trailing 3 → mean 2.0
        let closes = [100.0, 102.0, 105.0, 106.0];
        assert_approx(atr(&closes, 3), 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn uses_only_the_trailing_window() {
        // Deltas: 10, 1, 1 — window 2 ignores the early spike.
        let closes = [100.0, 110.0, 111.0, 112.0];
        assert_approx(atr(&closes, 2), 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn direction_is_ignored() {
        // Deltas: -2, +2 → both count as 2.
        let closes = [100.0, 98.0, 100.0];
        assert_approx(atr(&closes, 2), 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn short_series_is_zero() {
        let closes = [100.0, 101.0, 102.0];
        assert_eq!(atr(&closes, 3), 0.0); // 2 deltas < window 3
        assert_eq!(atr(&[], 14), 0.0);
        assert_eq!(atr(&[100.0], 14), 0.0);
    }

    #[test]
    fn flat_series_is_zero() {
        let closes = [100.0; 20];
        assert_eq!(atr(&closes, 14), 0.0);
    }

    #[test]
    fn zero_window_is_zero() {
        assert_eq!(atr(&[1.0, 2.0, 3.0], 0), 0.0);
    }
}
