//! Volatility z-score — how quiet is the market relative to its own history.
//!
//! Double-rolling construction: per-bar simple returns, rolling sample
//! standard deviation of those returns over `vol_window`, then the current
//! rolling volatility standardized against the mean/std of the trailing
//! `lookback` rolling-volatility values. Deeply negative z means the market
//! is unusually quiet — the squeeze precondition.

/// Below this, the volatility history counts as having zero spread. Rolling
/// windows over a perfectly periodic series produce stds that differ only in
/// the last few bits; dividing by that dust would turn a flat history into an
/// arbitrary z.
const STD_FLOOR: f64 = 1e-12;

/// Sample standard deviation (n-1 denominator) of a slice.
/// Returns 0.0 for fewer than two values.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}

/// Z-score of current rolling volatility against its trailing history.
///
/// Returns 0.0 when:
/// - the series cannot supply `lookback` complete rolling volatilities
///   (needs `lookback + vol_window` closes), or
/// - the standard deviation of the volatility history is zero or non-finite.
pub fn volatility_z(closes: &[f64], vol_window: usize, lookback: usize) -> f64 {
    let n = closes.len();
    if vol_window < 2 || lookback < 2 || n < lookback + vol_window {
        return 0.0;
    }

    // Per-bar simple returns. Zero prices would blow up the division; the
    // series boundary already drops non-finite closes, and synthetic-index
    // prices are strictly positive, so guard rather than propagate.
    let mut returns = Vec::with_capacity(n - 1);
    for w in closes.windows(2) {
        if w[0] == 0.0 {
            return 0.0;
        }
        returns.push((w[1] - w[0]) / w[0]);
    }

    // Rolling sample std of returns; keep only the trailing `lookback` values.
    let vols: Vec<f64> = returns
        .windows(vol_window)
        .map(sample_std)
        .collect();
    debug_assert!(vols.len() >= lookback);
    let hist = &vols[vols.len() - lookback..];

    let current = hist[hist.len() - 1];
    let mean = hist.iter().sum::<f64>() / hist.len() as f64;
    let std = sample_std(hist);

    if std < STD_FLOOR || !std.is_finite() {
        return 0.0;
    }
    (current - mean) / std
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    /// Alternating moves of amplitude `amp` around 100.
    fn oscillating(len: usize, amp: f64) -> Vec<f64> {
        (0..len)
            .map(|i| if i % 2 == 0 { 100.0 } else { 100.0 + amp })
            .collect()
    }

    #[test]
    fn short_series_is_zero() {
        let closes = oscillating(50, 1.0);
        assert_eq!(volatility_z(&closes, 20, 100), 0.0);
    }

    #[test]
    fn constant_volatility_history_is_zero() {
        // Perfectly periodic series → every rolling vol identical → std 0.
        let closes = oscillating(150, 1.0);
        assert_eq!(volatility_z(&closes, 20, 100), 0.0);
    }

    #[test]
    fn quiet_tail_is_deeply_negative() {
        // Noisy history, then the last stretch goes almost flat: the current
        // rolling vol sits far below the mean of its own history.
        let mut closes = oscillating(110, 2.0);
        for i in 0..30 {
            closes.push(100.0 + 0.001 * (i % 2) as f64);
        }
        let z = volatility_z(&closes, 20, 100);
        assert!(z < -1.0, "expected deeply negative z, got {z}");
    }

    #[test]
    fn loud_tail_is_positive() {
        let mut closes = oscillating(110, 0.5);
        for i in 0..30 {
            closes.push(if i % 2 == 0 { 100.0 } else { 108.0 });
        }
        let z = volatility_z(&closes, 20, 100);
        assert!(z > 1.0, "expected positive z, got {z}");
    }

    #[test]
    fn flat_series_is_zero() {
        let closes = vec![100.0; 200];
        assert_eq!(volatility_z(&closes, 20, 100), 0.0);
    }

    #[test]
    fn zero_price_is_guarded() {
        let mut closes = oscillating(200, 1.0);
        closes[50] = 0.0;
        assert_eq!(volatility_z(&closes, 20, 100), 0.0);
    }

    #[test]
    fn sample_std_basics() {
        assert_eq!(sample_std(&[]), 0.0);
        assert_eq!(sample_std(&[1.0]), 0.0);
        // Known value: std of [1,2,3,4] with n-1 denominator.
        assert_approx(sample_std(&[1.0, 2.0, 3.0, 4.0]), (5.0f64 / 3.0).sqrt(), 1e-12);
    }
}
