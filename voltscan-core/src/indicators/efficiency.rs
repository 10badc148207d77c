//! Kaufman efficiency ratio — trend quality over the trailing window.
//!
//! Net directional displacement divided by the total absolute path length
//! over the same bars. Near 1.0 the move is a clean straight line; near 0.0
//! the price churned and went nowhere.

/// `|close[last] - close[last-length]|` over the sum of the trailing `length`
/// absolute deltas. Bounded to [0, 1] by the triangle inequality.
///
/// Returns 0.0 if the series is shorter than `length + 1` closes or the path
/// length is zero (flat market).
pub fn efficiency_ratio(closes: &[f64], length: usize) -> f64 {
    let n = closes.len();
    if length == 0 || n < length + 1 {
        return 0.0;
    }

    let window = &closes[n - length - 1..];
    let net = (window[window.len() - 1] - window[0]).abs();
    let path: f64 = window.windows(2).map(|w| (w[1] - w[0]).abs()).sum();

    if path == 0.0 {
        return 0.0;
    }
    net / path
}
