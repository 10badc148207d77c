//! Ghost order — an armed, unexecuted breakout watch.
//!
//! Not a real order at the venue: just the two trigger levels bracketing the
//! arming price, plus the ATR captured at arming time (used later to size
//! stop-loss and take-profit). At most one exists per instrument, owned
//! exclusively by that instrument's lifecycle controller.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fraction of ATR the trigger levels sit away from the arming price.
pub const LEVEL_ATR_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostOrder {
    /// Price at or above which a buy-side breakout is a candidate.
    pub buy_level: f64,
    /// Price at or below which a sell-side breakout is a candidate.
    pub sell_level: f64,
    /// ATR snapshot taken when the order was armed.
    pub atr_at_arming: f64,
    /// When the squeeze fired and the order was armed.
    pub armed_at: DateTime<Utc>,
}

impl GhostOrder {
    /// Arm a new ghost order around `price` with levels at ±0.5 ATR.
    pub fn arm(price: f64, atr: f64, now: DateTime<Utc>) -> Self {
        Self {
            buy_level: price + atr * LEVEL_ATR_FRACTION,
            sell_level: price - atr * LEVEL_ATR_FRACTION,
            atr_at_arming: atr,
            armed_at: now,
        }
    }

    /// Age of the order at `now`. Clock skew (now before armed_at) reads as zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.armed_at).max(Duration::zero())
    }

    /// True once the order has outlived `expiry_secs` without a breakout.
    pub fn is_expired(&self, now: DateTime<Utc>, expiry_secs: i64) -> bool {
        self.age(now) > Duration::seconds(expiry_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn levels_bracket_price_by_half_atr() {
        let g = GhostOrder::arm(100.0, 4.0, t0());
        assert_eq!(g.buy_level, 102.0);
        assert_eq!(g.sell_level, 98.0);
        assert_eq!(g.atr_at_arming, 4.0);
    }

    #[test]
    fn expires_strictly_after_window() {
        let g = GhostOrder::arm(100.0, 4.0, t0());
        assert!(!g.is_expired(t0() + Duration::seconds(900), 900));
        assert!(g.is_expired(t0() + Duration::seconds(901), 900));
    }

    #[test]
    fn clock_skew_does_not_expire() {
        let g = GhostOrder::arm(100.0, 4.0, t0());
        assert_eq!(g.age(t0() - Duration::seconds(10)), Duration::zero());
        assert!(!g.is_expired(t0() - Duration::seconds(10), 900));
    }
}
