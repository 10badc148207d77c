//! Strategy configuration — every threshold the signal and lifecycle layers use.
//!
//! Defaults match the tuned production settings. All fields are plain numbers
//! so the struct round-trips through TOML/JSON unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds and window lengths for the squeeze-breakout strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Volatility z-score below which the market counts as squeezed.
    pub z_trigger: f64,
    /// Efficiency ratio above which the trend filter passes.
    pub er_filter: f64,
    /// Trailing window for ATR (bar-to-bar absolute deltas).
    pub atr_window: usize,
    /// Rolling window for the return-volatility series.
    pub vol_window: usize,
    /// Lookback over which the volatility series is standardized.
    pub lookback: usize,
    /// Bars of net displacement vs. path length for the efficiency ratio.
    pub er_length: usize,
    /// Trailing window for RSI gains/losses.
    pub rsi_window: usize,
    /// Minimum RSI to confirm a buy-side breakout.
    pub rsi_buy_min: f64,
    /// Maximum RSI to confirm a sell-side breakout.
    pub rsi_sell_max: f64,
    /// Stop-loss distance in ATR multiples from entry.
    pub sl_mult: f64,
    /// Take-profit distance in ATR multiples from entry.
    pub tp_mult: f64,
    /// Ghost-order lifetime in seconds; armed orders older than this expire.
    pub ghost_expiry_secs: i64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            z_trigger: -2.0,
            er_filter: 0.4,
            atr_window: 14,
            vol_window: 20,
            lookback: 100,
            er_length: 10,
            rsi_window: 14,
            rsi_buy_min: 55.0,
            rsi_sell_max: 45.0,
            sl_mult: 3.0,
            tp_mult: 9.0,
            ghost_expiry_secs: 900,
        }
    }
}

/// Validation errors for a strategy configuration.
#[derive(Debug, Error)]
pub enum StrategyConfigError {
    #[error("window '{name}' must be >= 1 (got {value})")]
    ZeroWindow { name: &'static str, value: usize },

    #[error("multiple '{name}' must be positive (got {value})")]
    NonPositiveMultiple { name: &'static str, value: f64 },

    #[error("rsi_buy_min ({buy_min}) must be greater than rsi_sell_max ({sell_max})")]
    InvertedRsiBands { buy_min: f64, sell_max: f64 },

    #[error("ghost_expiry_secs must be positive (got {0})")]
    NonPositiveExpiry(i64),

    #[error("lookback ({lookback}) must cover vol_window ({vol_window})")]
    LookbackTooShort { lookback: usize, vol_window: usize },
}

impl StrategyConfig {
    /// Check internal consistency. Called once at startup; the indicator and
    /// lifecycle code assumes a validated config.
    pub fn validate(&self) -> Result<(), StrategyConfigError> {
        for (name, value) in [
            ("atr_window", self.atr_window),
            ("vol_window", self.vol_window),
            ("lookback", self.lookback),
            ("er_length", self.er_length),
            ("rsi_window", self.rsi_window),
        ] {
            if value == 0 {
                return Err(StrategyConfigError::ZeroWindow { name, value });
            }
        }

        for (name, value) in [("sl_mult", self.sl_mult), ("tp_mult", self.tp_mult)] {
            if !(value > 0.0) {
                return Err(StrategyConfigError::NonPositiveMultiple { name, value });
            }
        }

        if self.rsi_buy_min <= self.rsi_sell_max {
            return Err(StrategyConfigError::InvertedRsiBands {
                buy_min: self.rsi_buy_min,
                sell_max: self.rsi_sell_max,
            });
        }

        if self.ghost_expiry_secs <= 0 {
            return Err(StrategyConfigError::NonPositiveExpiry(self.ghost_expiry_secs));
        }

        if self.lookback < self.vol_window {
            return Err(StrategyConfigError::LookbackTooShort {
                lookback: self.lookback,
                vol_window: self.vol_window,
            });
        }

        Ok(())
    }

    /// Minimum series length required before every indicator is defined.
    /// The volatility z-score has the deepest requirement: `lookback` rolling
    /// volatilities, each needing `vol_window` returns.
    pub fn min_history(&self) -> usize {
        self.lookback + self.vol_window + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        StrategyConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_window_rejected() {
        let cfg = StrategyConfig {
            atr_window: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(StrategyConfigError::ZeroWindow { name: "atr_window", .. })
        ));
    }

    #[test]
    fn inverted_rsi_bands_rejected() {
        let cfg = StrategyConfig {
            rsi_buy_min: 40.0,
            rsi_sell_max: 60.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(StrategyConfigError::InvertedRsiBands { .. })
        ));
    }

    #[test]
    fn negative_multiple_rejected() {
        let cfg = StrategyConfig {
            tp_mult: -1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn toml_round_trip_with_partial_override() {
        // serde(default): a sparse TOML table only overrides what it names.
        let cfg: StrategyConfig = toml_from_str("z_trigger = -1.5\nsl_mult = 2.0");
        assert_eq!(cfg.z_trigger, -1.5);
        assert_eq!(cfg.sl_mult, 2.0);
        assert_eq!(cfg.er_filter, 0.4);
        assert_eq!(cfg.ghost_expiry_secs, 900);
    }

    fn toml_from_str(s: &str) -> StrategyConfig {
        // JSON stands in for TOML here to keep this crate free of the toml
        // dependency; the scanner crate tests the real TOML path.
        let mut map = serde_json::Map::new();
        for line in s.lines() {
            let (k, v) = line.split_once(" = ").unwrap();
            map.insert(k.into(), v.parse::<f64>().unwrap().into());
        }
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }
}
