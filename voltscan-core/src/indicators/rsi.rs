//! Relative Strength Index over the trailing window.
//!
//! Plain averages of gains and losses over the trailing `window` deltas
//! (no Wilder smoothing — each cycle recomputes from the raw tail).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//!
//! Defined fallbacks instead of propagating a division by zero:
//! - no movement at all → 50.0 (neutral — confirms neither direction)
//! - avg_loss == 0 (straight up) → 100.0
//! - avg_gain == 0 (straight down) → 0.0
//! - series shorter than `window + 1` closes → 50.0 (neutral)

/// Neutral value returned when RSI is undefined. Sits strictly between the
/// buy (55) and sell (45) confirmation bands, so an undefined RSI can never
/// confirm a breakout.
pub const RSI_NEUTRAL: f64 = 50.0;

pub fn rsi(closes: &[f64], window: usize) -> f64 {
    let n = closes.len();
    if window == 0 || n < window + 1 {
        return RSI_NEUTRAL;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for w in closes[n - window - 1..].windows(2) {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            gains += delta;
        } else {
            losses -= delta;
        }
    }
    let avg_gain = gains / window as f64;
    let avg_loss = losses / window as f64;

    if avg_loss == 0.0 && avg_gain == 0.0 {
        RSI_NEUTRAL
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
